
// This file organizes the integration tests into a cohesive test suite.
// Each module tests a specific aspect of the application:
// - google_calendar_mock: the day view and facades driven by an in-memory calendar source
// - smoke_tests: settings files and the real client against a mocked Google API
