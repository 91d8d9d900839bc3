use crate::error::{other_error, DayResult};
use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};

/// Half-open interval `[start, end)` covering one local day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayWindow {
    /// `timeMin` query value, formatted like a JavaScript ISO string
    pub fn time_min(&self) -> String {
        self.start.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// `timeMax` query value
    pub fn time_max(&self) -> String {
        self.end.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Window from local midnight of `date` to local midnight of the following day
pub fn day_window<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DayResult<DayWindow> {
    let next_day = date
        .succ_opt()
        .ok_or_else(|| other_error(&format!("No day after {}", date)))?;

    Ok(DayWindow {
        start: start_of_day(tz, date)?,
        end: start_of_day(tz, next_day)?,
    })
}

/// First instant of a local day
pub fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DayResult<DateTime<Utc>> {
    let midnight = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => {
            // Midnight falls in a DST gap; the day starts at the first valid local time
            for minutes in (15..=180).step_by(15) {
                let candidate = midnight + Duration::minutes(minutes);
                if let Some(dt) = tz.from_local_datetime(&candidate).earliest() {
                    return Ok(dt.with_timezone(&Utc));
                }
            }
            Err(other_error(&format!("Invalid local midnight on {}", date)))
        }
    }
}

/// Today's date in the given zone
pub fn today_in<Tz: TimeZone>(tz: &Tz) -> NaiveDate {
    Utc::now().with_timezone(tz).date_naive()
}

/// Parse an RFC 3339 `dateTime` and shift it into the given zone
pub fn parse_date_time<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(tz))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Timelike};
    use chrono_tz::Tz;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_spans_local_midnights() {
        let helsinki: Tz = "Europe/Helsinki".parse().unwrap();
        let window = day_window(&helsinki, date(2026, 10, 14)).unwrap();

        assert_eq!(window.time_min(), "2026-10-13T21:00:00.000Z");
        assert_eq!(window.time_max(), "2026-10-14T21:00:00.000Z");
    }

    #[test]
    fn window_is_shorter_on_spring_forward() {
        let helsinki: Tz = "Europe/Helsinki".parse().unwrap();
        let window = day_window(&helsinki, date(2026, 3, 29)).unwrap();

        assert_eq!((window.end - window.start).num_hours(), 23);
    }

    #[test]
    fn missing_midnight_moves_to_first_valid_time() {
        // Santiago skips 00:00 to 01:00 when DST starts
        let santiago: Tz = "America/Santiago".parse().unwrap();
        let start = start_of_day(&santiago, date(2019, 9, 8)).unwrap();
        let local = start.with_timezone(&santiago);

        assert_eq!(local.date_naive(), date(2019, 9, 8));
        assert_eq!(local.hour(), 1);
    }

    #[test]
    fn utc_window_is_one_day() {
        let window = day_window(&Utc, date(2024, 2, 28)).unwrap();
        assert_eq!(window.time_min(), "2024-02-28T00:00:00.000Z");
        assert_eq!(window.time_max(), "2024-02-29T00:00:00.000Z");
    }

    #[test]
    fn parses_offsets_into_zone() {
        let utc_plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let dt = parse_date_time("2026-10-14T09:30:00Z", &utc_plus_two).unwrap();
        assert_eq!((dt.hour(), dt.minute()), (11, 30));

        assert!(parse_date_time("not a time", &Utc).is_none());
    }
}
