//! Child domain entity, derived values and the client snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{
    CHILD_NAME_MAX_LEN, DAYS_PER_YEAR, NATIONALITY_MAX_LEN, PIC_URL_MAX_LEN, SCHOOL_YEAR_MAX_LEN,
    SECONDS_PER_DAY,
};
use crate::constraints::{max_len, max_len_opt, required};
use crate::error::DomainResult;

/// Tracked child record.
///
/// Guardians, godparents and messages are not held here; they are looked up
/// through the repositories when asked for.
#[derive(Debug, Clone, PartialEq)]
pub struct Child {
    pub id: Uuid,
    pub pic_url: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub nick_name: String,
    pub birth_date: DateTime<Utc>,
    pub nationality: Option<String>,
    pub school_year: Option<String>,
    pub situation: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub activity: Option<bool>,
}

impl Child {
    /// Create a new child record with a fresh id.
    pub fn new(data: NewChild) -> DomainResult<Self> {
        data.check_constraints()?;

        Ok(Self {
            id: Uuid::new_v4(),
            pic_url: data.pic_url,
            first_name: data.first_name,
            last_name: data.last_name,
            nick_name: data.nick_name,
            birth_date: data.birth_date,
            nationality: data.nationality,
            school_year: data.school_year,
            situation: data.situation,
            latitude: data.latitude,
            longitude: data.longitude,
            activity: data.activity,
        })
    }

    /// First and last name joined by a single space.
    pub fn fullname(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Age in whole years as of `now`.
    ///
    /// Elapsed whole days (floored, so a birth date later today counts as -1)
    /// floor-divided by 365. Leap days and whether the birthday has passed
    /// this year are ignored, so this drifts from calendar age by up to a few
    /// days.
    pub fn age_at(&self, now: DateTime<Utc>) -> i64 {
        let days = (now - self.birth_date).num_seconds().div_euclid(SECONDS_PER_DAY);
        days.div_euclid(DAYS_PER_YEAR)
    }

    /// Age in whole years as of the current clock. See [`Child::age_at`].
    pub fn age(&self) -> i64 {
        self.age_at(Utc::now())
    }

    /// Flat snapshot of the scalar fields for transmission to a client.
    pub fn to_snapshot(&self) -> ChildSnapshot {
        ChildSnapshot::from(self)
    }
}

/// Child creation data.
#[derive(Debug, Clone, Deserialize)]
pub struct NewChild {
    pub pic_url: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub nick_name: String,
    pub birth_date: DateTime<Utc>,
    pub nationality: Option<String>,
    pub school_year: Option<String>,
    pub situation: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub activity: Option<bool>,
}

impl NewChild {
    /// Check the values against the `child` table's columns.
    pub fn check_constraints(&self) -> DomainResult<()> {
        max_len_opt("pic_url", self.pic_url.as_deref(), PIC_URL_MAX_LEN)?;
        for (field, value) in [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("nick_name", &self.nick_name),
        ] {
            required(field, value)?;
            max_len(field, value, CHILD_NAME_MAX_LEN)?;
        }
        max_len_opt("nationality", self.nationality.as_deref(), NATIONALITY_MAX_LEN)?;
        max_len_opt("school_year", self.school_year.as_deref(), SCHOOL_YEAR_MAX_LEN)
    }
}

/// Client-facing snapshot of a child's own columns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChildSnapshot {
    pub id: Uuid,
    pub pic_url: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub nick_name: String,
    pub birth_date: DateTime<Utc>,
    pub nationality: Option<String>,
    pub school_year: Option<String>,
    pub situation: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub activity: Option<bool>,
}

impl From<&Child> for ChildSnapshot {
    fn from(child: &Child) -> Self {
        Self {
            id: child.id,
            pic_url: child.pic_url.clone(),
            first_name: child.first_name.clone(),
            last_name: child.last_name.clone(),
            nick_name: child.nick_name.clone(),
            birth_date: child.birth_date,
            nationality: child.nationality.clone(),
            school_year: child.school_year.clone(),
            situation: child.situation.clone(),
            latitude: child.latitude,
            longitude: child.longitude,
            activity: child.activity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    use crate::error::DomainError;

    fn new_child(birth_date: DateTime<Utc>) -> NewChild {
        NewChild {
            pic_url: None,
            first_name: "Lucia".to_string(),
            last_name: "Mendez".to_string(),
            nick_name: "Lu".to_string(),
            birth_date,
            nationality: Some("Guatemalan".to_string()),
            school_year: Some("3rd grade".to_string()),
            situation: None,
            latitude: Some(14.6349),
            longitude: Some(-90.5069),
            activity: Some(true),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_fullname_joins_with_single_space() {
        let child = Child::new(new_child(now())).unwrap();
        assert_eq!(child.fullname(), "Lucia Mendez");
    }

    #[test]
    fn test_age_is_days_floor_365() {
        let child = Child::new(new_child(now() - Duration::days(730))).unwrap();
        assert_eq!(child.age_at(now()), 2);

        let child = Child::new(new_child(now() - Duration::days(364))).unwrap();
        assert_eq!(child.age_at(now()), 0);

        let child = Child::new(new_child(now() - Duration::days(365))).unwrap();
        assert_eq!(child.age_at(now()), 1);
    }

    #[test]
    fn test_age_ignores_leap_days() {
        // 3651 days: two days short of the tenth birthday, already 10 here
        let birth = Utc.with_ymd_and_hms(2014, 6, 3, 12, 0, 0).unwrap();
        let child = Child::new(new_child(birth)).unwrap();
        assert_eq!(child.age_at(now()), 10);
    }

    #[test]
    fn test_age_partial_days_do_not_count() {
        let birth = now() - Duration::days(365) + Duration::hours(1);
        let child = Child::new(new_child(birth)).unwrap();
        assert_eq!(child.age_at(now()), 0);
    }

    #[test]
    fn test_age_floors_future_birth_date() {
        let child = Child::new(new_child(now() + Duration::hours(3))).unwrap();
        assert_eq!(child.age_at(now()), -1);
    }

    #[test]
    fn test_snapshot_has_exactly_scalar_keys() {
        let child = Child::new(new_child(now())).unwrap();
        let json = serde_json::to_value(child.to_snapshot()).unwrap();
        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();

        assert_eq!(
            keys,
            vec![
                "activity",
                "birth_date",
                "first_name",
                "id",
                "last_name",
                "latitude",
                "longitude",
                "nationality",
                "nick_name",
                "pic_url",
                "school_year",
                "situation",
            ]
        );
        assert_eq!(json["id"], child.id.to_string());
    }

    #[test]
    fn test_missing_nick_name_is_constraint_violation() {
        let mut data = new_child(now());
        data.nick_name = String::new();
        assert!(matches!(
            Child::new(data),
            Err(DomainError::ConstraintViolation { field: "nick_name", .. })
        ));
    }

    #[test]
    fn test_pic_url_width() {
        let mut data = new_child(now());
        data.pic_url = Some("u".repeat(PIC_URL_MAX_LEN));
        assert!(Child::new(data.clone()).is_ok());

        data.pic_url = Some("u".repeat(PIC_URL_MAX_LEN + 1));
        assert!(Child::new(data).is_err());
    }
}
