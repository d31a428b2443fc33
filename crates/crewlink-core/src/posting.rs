//! Listings and job vacancies.
//!
//! Both kinds share one lifecycle: the poster owns the row, deletion only sets
//! `deleted_at`, and a deleted row disappears for everybody but its poster.

use chrono::{Duration, Utc};
use crewlink_db::postings::{self, NewPosting, PostingPatch};
use crewlink_db::relations::{self, Relation};
use crewlink_db::{Connection, Database};
use crewlink_types::EntityId;
use crewlink_types::actor::Actor;
use crewlink_types::api::{CreatePosting, PostingFilter, UpdatePosting};
use crewlink_types::models::{Posting, PostingDetail, PostingKind};
use tracing::info;

use crate::policy::{Action, authorize, require_user};
use crate::{Change, CoreError, CoreResult, apply_change, slug, validate_title};

/// How long a new posting stays open.
pub const DEFAULT_LIFETIME_DAYS: i64 = 30;

pub fn list(db: &Database, kind: PostingKind, filter: &PostingFilter) -> CoreResult<Vec<Posting>> {
    db.with_conn(|conn| Ok(postings::list(conn, kind, filter)?))
}

/// A soft-deleted posting is still visible to its poster.
pub fn get(db: &Database, kind: PostingKind, actor: Actor, id: EntityId) -> CoreResult<PostingDetail> {
    db.with_conn(|conn| {
        let not_found = CoreError::NotFound {
            entity: kind.entity(),
            id,
        };
        let posting = postings::find_including_deleted(conn, kind, id)?.ok_or(not_found)?;
        if posting.is_deleted() && !actor.is_user(posting.posted_by) {
            return Err(CoreError::NotFound {
                entity: kind.entity(),
                id,
            });
        }
        detail(conn, kind, posting)
    })
}

pub fn create(db: &Database, kind: PostingKind, actor: Actor, input: &CreatePosting) -> CoreResult<Posting> {
    let user_id = require_user(actor)?;
    let title = validate_title(&input.title)?;

    if input.posted_by.is_some_and(|id| id != user_id) {
        return Err(CoreError::Validation(
            "posted_by is assigned by the server and must be the acting user".into(),
        ));
    }

    let now = Utc::now();
    let slug = slug::generate();
    let new = NewPosting {
        title,
        description: &input.description,
        slug: &slug,
        posted_by: user_id,
        job_id: input.job_id,
        city_id: input.city_id,
        is_active: true,
        ends_at: now + Duration::days(DEFAULT_LIFETIME_DAYS),
        created_at: now,
    };
    let posting = db.transaction(|conn| -> CoreResult<Posting> { Ok(postings::insert(conn, kind, &new)?) })?;

    info!(
        kind = kind.entity(),
        id = posting.id,
        posted_by = user_id,
        slug = %posting.slug,
        "Posting created"
    );
    Ok(posting)
}

pub fn update(
    db: &Database,
    kind: PostingKind,
    actor: Actor,
    id: EntityId,
    input: &UpdatePosting,
) -> CoreResult<Posting> {
    require_user(actor)?;
    let title = input.title.as_deref().map(validate_title).transpose()?;

    db.transaction(|conn| {
        let current = postings::get(conn, kind, id)?;
        authorize(actor, Action::Update, &current)?;

        if input.posted_by.is_some_and(|by| by != current.posted_by) {
            return Err(CoreError::Validation("posted_by cannot be changed".into()));
        }
        if input.ends_at.is_some_and(|ends_at| ends_at <= current.created_at) {
            return Err(CoreError::Validation("ends_at must be after created_at".into()));
        }

        let patch = PostingPatch {
            title,
            description: input.description.as_deref(),
            city_id: input.city_id,
            job_id: input.job_id,
            is_active: input.is_active,
            ends_at: input.ends_at,
        };
        Ok(postings::update(conn, kind, id, &patch)?)
    })
}

/// Soft delete. Skills stay attached so the poster still sees them.
pub fn delete(db: &Database, kind: PostingKind, actor: Actor, id: EntityId) -> CoreResult<()> {
    require_user(actor)?;

    db.transaction(|conn| {
        let posting = postings::get(conn, kind, id)?;
        authorize(actor, Action::Delete, &posting)?;
        postings::soft_delete(conn, kind, id, Utc::now())?;
        Ok::<_, CoreError>(())
    })?;

    info!(kind = kind.entity(), id, "Posting deleted");
    Ok(())
}

/// Attach or detach skills on a live listing. Poster only.
pub fn change_skills(
    db: &Database,
    actor: Actor,
    id: EntityId,
    skill_ids: &[EntityId],
    change: Change,
) -> CoreResult<PostingDetail> {
    require_user(actor)?;

    db.transaction(|conn| {
        let listing = postings::get(conn, PostingKind::Listing, id)?;
        authorize(actor, Action::ManageRelations, &listing)?;
        apply_change(conn, Relation::ListingSkills, id, skill_ids, change)?;
        detail(conn, PostingKind::Listing, listing)
    })
}

fn detail(conn: &Connection, kind: PostingKind, posting: Posting) -> CoreResult<PostingDetail> {
    let skills = if kind.has_skills() {
        Some(relations::tags(conn, Relation::ListingSkills, posting.id)?)
    } else {
        None
    };
    Ok(PostingDetail { posting, skills })
}

#[cfg(test)]
mod tests {
    use crewlink_db::reference::{self, TagKind};
    use crewlink_types::UserId;

    use super::*;
    use crate::fixtures;

    struct World {
        db: Database,
        poster: UserId,
        stranger: UserId,
        city: EntityId,
        job: EntityId,
    }

    fn world() -> World {
        let db = fixtures::db();
        World {
            poster: fixtures::user(&db, "poster"),
            stranger: fixtures::user(&db, "stranger"),
            city: fixtures::city(&db, "Berlin"),
            job: fixtures::job(&db, "Filmmaker"),
            db,
        }
    }

    impl World {
        fn form(&self) -> CreatePosting {
            CreatePosting {
                title: "Music video for a techno single".into(),
                description: "Looking for an experienced filmmaker".into(),
                city_id: self.city,
                job_id: self.job,
                posted_by: None,
            }
        }

        fn post(&self, kind: PostingKind) -> Posting {
            create(&self.db, kind, Actor::User(self.poster), &self.form()).unwrap()
        }
    }

    #[test]
    fn create_assigns_server_defaults() {
        let w = world();
        let listing = w.post(PostingKind::Listing);

        assert_eq!(listing.posted_by, w.poster);
        assert!(listing.is_active);
        assert!(listing.deleted_at.is_none());
        assert_eq!(listing.slug.len(), 32);
    }

    #[test]
    fn vacancy_ends_thirty_days_after_creation() {
        let w = world();
        let vacancy = w.post(PostingKind::JobVacancy);
        assert_eq!(vacancy.ends_at - vacancy.created_at, Duration::days(30));
    }

    #[test]
    fn guest_cannot_create() {
        let w = world();
        let err = create(&w.db, PostingKind::Listing, Actor::Guest, &w.form()).unwrap_err();

        assert!(matches!(err, CoreError::Unauthenticated));
        assert_eq!(fixtures::row_count(&w.db, "listings"), 0);
    }

    #[test]
    fn conflicting_posted_by_is_rejected() {
        let w = world();
        let forged = CreatePosting {
            posted_by: Some(w.stranger),
            ..w.form()
        };

        let err = create(&w.db, PostingKind::Listing, Actor::User(w.poster), &forged).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(fixtures::row_count(&w.db, "listings"), 0);
    }

    #[test]
    fn unknown_job_is_a_constraint_violation() {
        let w = world();
        let input = CreatePosting {
            job_id: 999,
            ..w.form()
        };

        let err = create(&w.db, PostingKind::JobVacancy, Actor::User(w.poster), &input).unwrap_err();
        assert!(matches!(err, CoreError::ConstraintViolation(m) if m.contains("job_id")));
    }

    #[test]
    fn only_poster_can_update() {
        let w = world();
        let listing = w.post(PostingKind::Listing);
        let input = UpdatePosting {
            title: Some("Here is a New Title".into()),
            ..Default::default()
        };

        let err = update(&w.db, PostingKind::Listing, Actor::User(w.stranger), listing.id, &input).unwrap_err();
        assert!(matches!(err, CoreError::Unauthorized));
        assert_eq!(err.to_string(), "Unauthorized action.");

        let updated = update(&w.db, PostingKind::Listing, Actor::User(w.poster), listing.id, &input).unwrap();
        assert_eq!(updated.title, "Here is a New Title");
        assert_eq!(updated.slug, listing.slug);
    }

    #[test]
    fn guest_cannot_update_or_delete() {
        let w = world();
        let input = UpdatePosting {
            title: Some("Hijacked".into()),
            ..Default::default()
        };

        for kind in [PostingKind::Listing, PostingKind::JobVacancy] {
            let posting = w.post(kind);

            let err = update(&w.db, kind, Actor::Guest, posting.id, &input).unwrap_err();
            assert!(matches!(err, CoreError::Unauthenticated));
            assert_eq!(err.to_string(), "Unauthenticated.");

            let err = delete(&w.db, kind, Actor::Guest, posting.id).unwrap_err();
            assert!(matches!(err, CoreError::Unauthenticated));

            let stored = get(&w.db, kind, Actor::Guest, posting.id).unwrap();
            assert_eq!(stored.posting.title, posting.title);
            assert!(stored.posting.deleted_at.is_none());
        }
    }

    #[test]
    fn ends_at_must_follow_creation() {
        let w = world();
        let listing = w.post(PostingKind::Listing);
        let input = UpdatePosting {
            ends_at: Some(listing.created_at - Duration::days(1)),
            ..Default::default()
        };

        assert!(matches!(
            update(&w.db, PostingKind::Listing, Actor::User(w.poster), listing.id, &input),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn posted_by_is_immutable() {
        let w = world();
        let listing = w.post(PostingKind::Listing);
        let input = UpdatePosting {
            posted_by: Some(w.stranger),
            ..Default::default()
        };

        assert!(matches!(
            update(&w.db, PostingKind::Listing, Actor::User(w.poster), listing.id, &input),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn delete_is_soft_and_hidden_from_others() {
        let w = world();
        let listing = w.post(PostingKind::Listing);

        assert!(matches!(
            delete(&w.db, PostingKind::Listing, Actor::User(w.stranger), listing.id),
            Err(CoreError::Unauthorized)
        ));
        delete(&w.db, PostingKind::Listing, Actor::User(w.poster), listing.id).unwrap();

        assert_eq!(fixtures::row_count(&w.db, "listings"), 1);
        for actor in [Actor::Guest, Actor::User(w.stranger)] {
            assert!(matches!(
                get(&w.db, PostingKind::Listing, actor, listing.id),
                Err(CoreError::NotFound { entity: "Listing", .. })
            ));
        }
        let own = get(&w.db, PostingKind::Listing, Actor::User(w.poster), listing.id).unwrap();
        assert!(own.posting.deleted_at.is_some());

        assert!(list(&w.db, PostingKind::Listing, &PostingFilter::default()).unwrap().is_empty());
    }

    #[test]
    fn deleted_posting_cannot_be_changed() {
        let w = world();
        let vacancy = w.post(PostingKind::JobVacancy);
        delete(&w.db, PostingKind::JobVacancy, Actor::User(w.poster), vacancy.id).unwrap();

        let input = UpdatePosting {
            is_active: Some(false),
            ..Default::default()
        };
        assert!(matches!(
            update(&w.db, PostingKind::JobVacancy, Actor::User(w.poster), vacancy.id, &input),
            Err(CoreError::NotFound { .. })
        ));
        assert!(matches!(
            delete(&w.db, PostingKind::JobVacancy, Actor::User(w.poster), vacancy.id),
            Err(CoreError::NotFound { .. })
        ));
    }

    #[test]
    fn listing_skills_are_managed_by_poster() {
        let w = world();
        let listing = w.post(PostingKind::Listing);
        let skills = w
            .db
            .with_conn(|conn| reference::list_tags(conn, TagKind::Skill))
            .unwrap();
        let ids: Vec<EntityId> = skills.iter().take(2).map(|s| s.id).collect();

        assert!(matches!(
            change_skills(&w.db, Actor::User(w.stranger), listing.id, &ids, Change::Add),
            Err(CoreError::Unauthorized)
        ));

        change_skills(&w.db, Actor::User(w.poster), listing.id, &ids, Change::Add).unwrap();
        let detail = change_skills(&w.db, Actor::User(w.poster), listing.id, &ids, Change::Add).unwrap();
        assert_eq!(detail.skills.map(|s| s.len()), Some(2));

        let detail = get(&w.db, PostingKind::Listing, Actor::Guest, listing.id).unwrap();
        assert_eq!(detail.skills.map(|s| s.len()), Some(2));
    }

    #[test]
    fn vacancy_detail_has_no_skills() {
        let w = world();
        let vacancy = w.post(PostingKind::JobVacancy);
        let detail = get(&w.db, PostingKind::JobVacancy, Actor::Guest, vacancy.id).unwrap();
        assert!(detail.skills.is_none());
    }
}
