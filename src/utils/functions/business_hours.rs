use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveTime, Utc, Weekday};
use chrono_tz::Tz;
use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};
use tracing::debug;

use super::base::{FunctionDeclaration, FunctionDeclarationName};
use crate::utils::response::to_json;
use crate::Error;

pub const INVALID_DAY: &str = "Invalid day";
pub const INVALID_DAY_STATUS: &str = "Invalid day.";
pub const OFFICE_OPEN: &str = "The office is open.";
pub const OFFICE_CLOSED: &str = "The office is closed.";

const WEEK: [Weekday; 7] = [
  Weekday::Mon,
  Weekday::Tue,
  Weekday::Wed,
  Weekday::Thu,
  Weekday::Fri,
  Weekday::Sat,
  Weekday::Sun,
];

pub fn get_business_hours_fn() -> FunctionDeclaration {
  FunctionDeclaration {
    name: FunctionDeclarationName::GetBusinessHours,
    description: String::from("Check or set office opening hours before scheduling appointment"),
    parameters: serde_json::json!({
      "type": "object",
      "properties": {
        "day": {
          "type": "string",
          "enum": ["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"],
          "description": "Day of the week"
        },
        "open": {
          "type": "string",
          "description": "Opening time, e.g., 09:00"
        },
        "close": {
          "type": "string",
          "description": "Closing time, e.g., 19:00"
        }
      },
      "required": ["day", "open", "close"]
    }),
  }
}

pub fn is_business_open_fn() -> FunctionDeclaration {
  FunctionDeclaration {
    name: FunctionDeclarationName::IsBusinessOpen,
    description: String::from("Check if business is open or closed"),
    parameters: serde_json::json!({
      "type": "object",
      "properties": {
        "current_day": {
          "type": "string",
          "description": "Today's day, e.g. Monday"
        },
        "current_time": {
          "type": "string",
          "description": "Current time, e.g. 09:30"
        }
      },
      "required": ["current_day", "current_time"]
    }),
  }
}

/// Full English name of a weekday, e.g. `Monday`.
pub fn weekday_name(day: Weekday) -> &'static str {
  match day {
    Weekday::Mon => "Monday",
    Weekday::Tue => "Tuesday",
    Weekday::Wed => "Wednesday",
    Weekday::Thu => "Thursday",
    Weekday::Fri => "Friday",
    Weekday::Sat => "Saturday",
    Weekday::Sun => "Sunday",
  }
}

/// Exact, case-sensitive match against the seven full weekday names.
pub fn parse_weekday_name(name: &str) -> Option<Weekday> {
  WEEK.iter().copied().find(|day| weekday_name(*day) == name)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningHours {
  pub open: String,
  pub close: String,
}

impl OpeningHours {
  pub fn new(open: &str, close: &str) -> Self {
    Self {
      open: open.to_owned(),
      close: close.to_owned(),
    }
  }
}

/// Opening hours for every day of the week, indexed from Monday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekdaySchedule {
  days: [OpeningHours; 7],
}

impl WeekdaySchedule {
  pub fn new(days: [OpeningHours; 7]) -> Self {
    Self { days }
  }

  pub fn hours(&self, day: Weekday) -> &OpeningHours {
    &self.days[day.num_days_from_monday() as usize]
  }

  pub fn iter(&self) -> impl Iterator<Item = (Weekday, &OpeningHours)> {
    WEEK.iter().copied().map(move |day| (day, self.hours(day)))
  }
}

impl Default for WeekdaySchedule {
  fn default() -> Self {
    let weekday = OpeningHours::new("8:00", "19:00");
    Self::new([
      weekday.clone(),
      weekday.clone(),
      weekday.clone(),
      weekday.clone(),
      weekday,
      OpeningHours::new("9:00", "16:00"),
      OpeningHours::new("10:00", "15:00"),
    ])
  }
}

impl Serialize for WeekdaySchedule {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(WEEK.len()))?;
    for (day, hours) in self.iter() {
      map.serialize_entry(weekday_name(day), hours)?;
    }
    map.end()
  }
}

/// Wall-clock `HH:MM` time. Single-digit hours such as `8:00` are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
  pub fn time(&self) -> NaiveTime {
    self.0
  }
}

impl FromStr for TimeOfDay {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if !is_hh_mm(s) {
      return Err(Error::InvalidTimeFormat {
        value: s.to_owned(),
        source: None,
      });
    }
    NaiveTime::parse_from_str(s, "%H:%M")
      .map(TimeOfDay)
      .map_err(|source| Error::InvalidTimeFormat {
        value: s.to_owned(),
        source: Some(source),
      })
  }
}

/// chrono skips whitespace ahead of numeric fields, so the shape is checked
/// first: one or two digits, a colon, one or two digits.
fn is_hh_mm(s: &str) -> bool {
  let digits = |part: &str| (1..=2).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit());
  match s.split_once(':') {
    Some((hour, minute)) => digits(hour) && digits(minute),
    None => false,
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BusinessHoursRequest {
  pub day: Option<String>,
  pub open: Option<String>,
  pub close: Option<String>,
}

impl BusinessHoursRequest {
  pub fn all() -> Self {
    Self::default()
  }

  pub fn for_day(day: &str) -> Self {
    Self {
      day: Some(day.to_owned()),
      ..Self::default()
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenStatusRequest {
  pub current_day: Option<String>,
  pub current_time: Option<String>,
}

impl OpenStatusRequest {
  pub fn new(current_day: &str, current_time: &str) -> Self {
    Self {
      current_day: Some(current_day.to_owned()),
      current_time: Some(current_time.to_owned()),
    }
  }
}

#[derive(Serialize)]
#[serde(untagged)]
enum DayHours<'a> {
  Hours(&'a OpeningHours),
  Invalid(&'static str),
}

/// Result of a business hours lookup, before it is rendered for the model.
#[derive(Debug, PartialEq, Eq)]
pub enum BusinessHours<'a> {
  /// No day requested.
  All(&'a WeekdaySchedule),
  /// Only a day requested; rendered wrapped in an object keyed by the day.
  Day {
    name: String,
    hours: Option<&'a OpeningHours>,
  },
  /// Day with opening and/or closing time supplied. The supplied times are
  /// not applied; the stored hours are returned as they are.
  Explicit(Option<&'a OpeningHours>),
}

impl BusinessHours<'_> {
  pub fn render(&self) -> Result<String, Error> {
    match self {
      BusinessHours::All(schedule) => to_json(schedule),
      BusinessHours::Day { name, hours } => {
        let hours = match hours {
          Some(hours) => DayHours::Hours(*hours),
          None => DayHours::Invalid(INVALID_DAY),
        };
        to_json(&BTreeMap::from([(name.as_str(), hours)]))
      }
      BusinessHours::Explicit(Some(hours)) => to_json(hours),
      BusinessHours::Explicit(None) => Ok(INVALID_DAY.to_owned()),
    }
  }
}

pub struct BusinessHoursService {
  schedule: WeekdaySchedule,
  timezone: Tz,
}

impl BusinessHoursService {
  pub fn new(schedule: WeekdaySchedule, timezone: Tz) -> Self {
    Self { schedule, timezone }
  }

  pub fn schedule(&self) -> &WeekdaySchedule {
    &self.schedule
  }

  pub fn timezone(&self) -> Tz {
    self.timezone
  }

  pub fn lookup(&self, request: &BusinessHoursRequest) -> BusinessHours<'_> {
    let Some(day) = request.day.as_deref() else {
      return BusinessHours::All(&self.schedule);
    };
    let hours = parse_weekday_name(day).map(|weekday| self.schedule.hours(weekday));

    if !day.is_empty() && request.open.is_none() && request.close.is_none() {
      BusinessHours::Day {
        name: day.to_owned(),
        hours,
      }
    } else {
      BusinessHours::Explicit(hours)
    }
  }

  pub fn get_business_hours(&self, request: &BusinessHoursRequest) -> Result<String, Error> {
    self.lookup(request).render()
  }

  pub fn is_business_open(&self, request: &OpenStatusRequest) -> Result<String, Error> {
    self.is_business_open_at(request, Utc::now())
  }

  /// Like [`Self::is_business_open`], with `now` standing in for the clock
  /// when the day or time is missing from the request.
  pub fn is_business_open_at(
    &self,
    request: &OpenStatusRequest,
    now: DateTime<Utc>,
  ) -> Result<String, Error> {
    let (day, time) = match (&request.current_day, &request.current_time) {
      (Some(day), Some(time)) => (day.clone(), time.clone()),
      _ => {
        let local = now.with_timezone(&self.timezone);
        (
          weekday_name(local.weekday()).to_owned(),
          local.format("%H:%M").to_string(),
        )
      }
    };

    let hours = match self.lookup(&BusinessHoursRequest::for_day(&day)) {
      BusinessHours::Day {
        hours: Some(hours), ..
      } => hours,
      _ => return Ok(INVALID_DAY_STATUS.to_owned()),
    };

    let open: TimeOfDay = hours.open.parse()?;
    let close: TimeOfDay = hours.close.parse()?;
    let current: TimeOfDay = time.parse()?;
    debug!(%day, %time, "checking opening hours");

    if open <= current && current <= close {
      Ok(OFFICE_OPEN.to_owned())
    } else {
      Ok(OFFICE_CLOSED.to_owned())
    }
  }
}

impl Default for BusinessHoursService {
  fn default() -> Self {
    Self::new(WeekdaySchedule::default(), chrono_tz::Europe::London)
  }
}
