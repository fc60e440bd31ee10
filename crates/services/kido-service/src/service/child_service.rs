//! Child service - intake, lookups and guardian/godparent links.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use std::sync::Arc;
use uuid::Uuid;

use common::{AppResult, OptionExt};
use domain::{
    Child, ChildSnapshot, ChildToGodparent, ChildToGuardian, Godparent, Guardian, NewChild,
    NewGodparent, NewGuardian,
};
use forms::rules::REQUIRED_MESSAGE;
use forms::{ChildIntake, FormErrors};

use crate::repository::{ChildRepository, GodparentRepository, GuardianRepository};

#[async_trait]
pub trait ChildService: Send + Sync {
    /// Register a child from a validated intake form, creating and linking
    /// the guardian and godparent it names.
    async fn intake(&self, intake: ChildIntake) -> AppResult<Child>;

    async fn get_child(&self, id: Uuid) -> AppResult<Child>;

    /// Flat client-facing view of a child
    async fn snapshot(&self, id: Uuid) -> AppResult<ChildSnapshot>;

    async fn find_by_fullname(&self, fullname: &str) -> AppResult<Vec<Child>>;

    async fn list_children(&self) -> AppResult<Vec<Child>>;

    async fn guardians(&self, child_id: Uuid) -> AppResult<Vec<Guardian>>;

    async fn godparents(&self, child_id: Uuid) -> AppResult<Vec<Godparent>>;

    /// Create a guardian linked to the child. A failed link leaves no guardian.
    async fn add_guardian(&self, child_id: Uuid, data: NewGuardian) -> AppResult<Guardian>;

    /// Create a godparent linked to the child. A failed link leaves no godparent.
    async fn add_godparent(&self, child_id: Uuid, data: NewGodparent) -> AppResult<Godparent>;

    /// Children in a guardian's care
    async fn guardian_children(&self, guardian_id: Uuid) -> AppResult<Vec<Child>>;

    /// Children a godparent sponsors
    async fn sponsored_children(&self, godparent_id: Uuid) -> AppResult<Vec<Child>>;

    /// Godparents registered under an email, matched lowercased
    async fn find_godparents_by_email(&self, email: &str) -> AppResult<Vec<Godparent>>;

    async fn link_guardian(&self, child_id: Uuid, guardian_id: Uuid) -> AppResult<ChildToGuardian>;

    async fn link_godparent(&self, child_id: Uuid, godparent_id: Uuid) -> AppResult<ChildToGodparent>;

    async fn delete_child(&self, id: Uuid) -> AppResult<()>;
}

pub struct ChildManager {
    children: Arc<dyn ChildRepository>,
    guardians: Arc<dyn GuardianRepository>,
    godparents: Arc<dyn GodparentRepository>,
}

impl ChildManager {
    pub fn new(
        children: Arc<dyn ChildRepository>,
        guardians: Arc<dyn GuardianRepository>,
        godparents: Arc<dyn GodparentRepository>,
    ) -> Self {
        Self {
            children,
            guardians,
            godparents,
        }
    }
}

/// Midnight UTC on the given day.
fn start_of_day(date: NaiveDate) -> chrono::DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// Split an intake into the rows it creates.
///
/// The intake form has no nick name field, so the first name stands in.
/// Medical condition, doctor appointment, home visit and godparent prefix
/// have no column and are not stored.
fn intake_rows(intake: &ChildIntake) -> AppResult<(Child, Option<Guardian>, Option<Godparent>)> {
    let child = Child::new(NewChild {
        pic_url: None,
        first_name: intake.first_name.clone(),
        last_name: intake.last_name.clone(),
        nick_name: intake.first_name.clone(),
        birth_date: start_of_day(intake.birth_date),
        nationality: None,
        school_year: None,
        situation: intake.situation.clone(),
        latitude: intake.latitude,
        longitude: intake.longitude,
        activity: None,
    })?;

    let guardian = if intake.has_guardian() {
        Some(Guardian::new(NewGuardian {
            guardian_type: intake.guardian_type.clone(),
            guardian_fname: intake.guardian_fname.clone(),
            guardian_lname: intake.guardian_lname.clone(),
        })?)
    } else {
        None
    };

    let godparent = if intake.has_godparent() {
        match (&intake.godparent_fname, &intake.godparent_lname) {
            (Some(first_name), Some(last_name)) => Some(Godparent::new(NewGodparent {
                first_name: first_name.clone(),
                last_name: last_name.clone(),
                email: intake.godparent_email.clone(),
            })?),
            _ => {
                let mut errors = FormErrors::default();
                if intake.godparent_fname.is_none() {
                    errors.add("godparent_fname", REQUIRED_MESSAGE);
                }
                if intake.godparent_lname.is_none() {
                    errors.add("godparent_lname", REQUIRED_MESSAGE);
                }
                return Err(errors.into());
            }
        }
    } else {
        None
    };

    Ok((child, guardian, godparent))
}

#[async_trait]
impl ChildService for ChildManager {
    async fn intake(&self, intake: ChildIntake) -> AppResult<Child> {
        let (child, guardian, godparent) = intake_rows(&intake)?;

        let child = self
            .children
            .create_with_relations(&child, guardian, godparent)
            .await?;

        tracing::info!(child_id = %child.id, "Child registered");
        Ok(child)
    }

    async fn get_child(&self, id: Uuid) -> AppResult<Child> {
        self.children.find_by_id(id).await?.ok_or_not_found()
    }

    async fn snapshot(&self, id: Uuid) -> AppResult<ChildSnapshot> {
        Ok(self.get_child(id).await?.to_snapshot())
    }

    async fn find_by_fullname(&self, fullname: &str) -> AppResult<Vec<Child>> {
        self.children.find_by_fullname(fullname).await
    }

    async fn list_children(&self) -> AppResult<Vec<Child>> {
        self.children.list().await
    }

    async fn guardians(&self, child_id: Uuid) -> AppResult<Vec<Guardian>> {
        self.get_child(child_id).await?;
        self.children.guardians(child_id).await
    }

    async fn godparents(&self, child_id: Uuid) -> AppResult<Vec<Godparent>> {
        self.get_child(child_id).await?;
        self.children.godparents(child_id).await
    }

    async fn add_guardian(&self, child_id: Uuid, data: NewGuardian) -> AppResult<Guardian> {
        let guardian = Guardian::new(data)?;
        self.children.add_guardian(child_id, &guardian).await
    }

    async fn add_godparent(&self, child_id: Uuid, data: NewGodparent) -> AppResult<Godparent> {
        let godparent = Godparent::new(data)?;
        self.children.add_godparent(child_id, &godparent).await
    }

    async fn guardian_children(&self, guardian_id: Uuid) -> AppResult<Vec<Child>> {
        self.guardians.find_by_id(guardian_id).await?.ok_or_not_found()?;
        self.guardians.children(guardian_id).await
    }

    async fn sponsored_children(&self, godparent_id: Uuid) -> AppResult<Vec<Child>> {
        self.godparents.find_by_id(godparent_id).await?.ok_or_not_found()?;
        self.godparents.children(godparent_id).await
    }

    async fn find_godparents_by_email(&self, email: &str) -> AppResult<Vec<Godparent>> {
        self.godparents.find_by_email(&email.to_lowercase()).await
    }

    async fn link_guardian(&self, child_id: Uuid, guardian_id: Uuid) -> AppResult<ChildToGuardian> {
        self.children.link_guardian(child_id, guardian_id).await
    }

    async fn link_godparent(&self, child_id: Uuid, godparent_id: Uuid) -> AppResult<ChildToGodparent> {
        self.children.link_godparent(child_id, godparent_id).await
    }

    async fn delete_child(&self, id: Uuid) -> AppResult<()> {
        self.children.delete(id).await?;
        tracing::info!(child_id = %id, "Child deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::AppError;
    use mockall::predicate::eq;

    use crate::repository::{
        MockChildRepository, MockGodparentRepository, MockGuardianRepository,
    };

    fn intake() -> ChildIntake {
        ChildIntake {
            first_name: "Lucia".to_string(),
            last_name: "Mendez".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2015, 4, 12).unwrap(),
            guardian_type: None,
            guardian_fname: None,
            guardian_lname: None,
            godparent_prefix: None,
            godparent_fname: None,
            godparent_lname: None,
            godparent_email: None,
            medical_condition: None,
            doctor_appt: None,
            situation: Some("Lives with grandmother".to_string()),
            home_visit: None,
            latitude: Some(14.6349),
            longitude: None,
        }
    }

    fn manager(children: MockChildRepository) -> ChildManager {
        ChildManager::new(
            Arc::new(children),
            Arc::new(MockGuardianRepository::new()),
            Arc::new(MockGodparentRepository::new()),
        )
    }

    #[test]
    fn test_intake_rows_child_only() {
        let (child, guardian, godparent) = intake_rows(&intake()).unwrap();

        assert_eq!(child.fullname(), "Lucia Mendez");
        assert_eq!(child.nick_name, "Lucia");
        assert_eq!(child.birth_date.to_rfc3339(), "2015-04-12T00:00:00+00:00");
        assert!(guardian.is_none());
        assert!(godparent.is_none());
    }

    #[test]
    fn test_intake_rows_with_relatives() {
        let mut data = intake();
        data.guardian_type = Some("grandmother".to_string());
        data.godparent_fname = Some("Maria".to_string());
        data.godparent_lname = Some("Smith".to_string());
        data.godparent_email = Some("maria@kido.org".to_string());

        let (_, guardian, godparent) = intake_rows(&data).unwrap();

        assert_eq!(guardian.unwrap().guardian_type.as_deref(), Some("grandmother"));
        assert_eq!(godparent.unwrap().email.as_deref(), Some("maria@kido.org"));
    }

    #[test]
    fn test_intake_rows_godparent_needs_names() {
        let mut data = intake();
        data.godparent_email = Some("maria@kido.org".to_string());

        let err = intake_rows(&data).unwrap_err();
        match err {
            AppError::InvalidForm(fields) => {
                assert!(fields.contains_key("godparent_fname"));
                assert!(fields.contains_key("godparent_lname"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_intake_creates_in_one_call() {
        let mut children = MockChildRepository::new();
        children
            .expect_create_with_relations()
            .withf(|_, guardian, godparent| guardian.is_some() && godparent.is_none())
            .times(1)
            .returning(|child, _, _| Ok(child.clone()));

        let mut data = intake();
        data.guardian_fname = Some("Rosa".to_string());

        let child = manager(children).intake(data).await.unwrap();
        assert_eq!(child.first_name, "Lucia");
    }

    #[tokio::test]
    async fn test_snapshot_not_found() {
        let mut children = MockChildRepository::new();
        children.expect_find_by_id().returning(|_| Ok(None));

        let result = manager(children).snapshot(Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_guardians_of_missing_child_is_not_found() {
        let mut children = MockChildRepository::new();
        children.expect_find_by_id().returning(|_| Ok(None));
        children.expect_guardians().never();

        let result = manager(children).guardians(Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_duplicate_link_propagates_constraint_violation() {
        let child_id = Uuid::new_v4();
        let guardian_id = Uuid::new_v4();

        let mut children = MockChildRepository::new();
        children
            .expect_link_guardian()
            .with(eq(child_id), eq(guardian_id))
            .returning(|_, _| Err(AppError::ConstraintViolation("Record already exists".to_string())));

        let result = manager(children).link_guardian(child_id, guardian_id).await;
        assert!(matches!(result, Err(AppError::ConstraintViolation(_))));
    }

    #[tokio::test]
    async fn test_add_godparent_goes_through_one_repository_call() {
        let child_id = Uuid::new_v4();

        let mut children = MockChildRepository::new();
        children
            .expect_add_godparent()
            .withf(move |c, g| *c == child_id && g.first_name == "Maria")
            .times(1)
            .returning(|_, g| Ok(g.clone()));
        children.expect_link_godparent().never();

        let godparent = manager(children)
            .add_godparent(
                child_id,
                NewGodparent {
                    first_name: "Maria".to_string(),
                    last_name: "Smith".to_string(),
                    email: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(godparent.first_name, "Maria");
    }

    #[tokio::test]
    async fn test_add_guardian_rejects_wide_name_before_storage() {
        let mut children = MockChildRepository::new();
        children.expect_add_guardian().never();

        let result = manager(children)
            .add_guardian(
                Uuid::new_v4(),
                NewGuardian {
                    guardian_type: None,
                    guardian_fname: Some("x".repeat(33)),
                    guardian_lname: None,
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::ConstraintViolation(_))));
    }

    #[tokio::test]
    async fn test_find_godparents_by_email_lowercases() {
        let mut godparents = MockGodparentRepository::new();
        godparents
            .expect_find_by_email()
            .with(eq("maria@kido.org"))
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let service = ChildManager::new(
            Arc::new(MockChildRepository::new()),
            Arc::new(MockGuardianRepository::new()),
            Arc::new(godparents),
        );
        assert!(service
            .find_godparents_by_email("Maria@Kido.org")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_sponsored_children_of_missing_godparent() {
        let mut godparents = MockGodparentRepository::new();
        godparents.expect_find_by_id().returning(|_| Ok(None));
        godparents.expect_children().never();

        let service = ChildManager::new(
            Arc::new(MockChildRepository::new()),
            Arc::new(MockGuardianRepository::new()),
            Arc::new(godparents),
        );
        let result = service.sponsored_children(Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }
}
