//! Audit stamping shared by every catalog entity.
//!
//! Each write goes through [`stamp`] with the acting principal. Inserts set
//! both timestamps and both actors; updates only touch `updated_at` and
//! `updated_by`. `updated_at` is kept strictly increasing per row at
//! microsecond resolution, which is what PostgreSQL `timestamptz` stores.
use std::fmt;

use chrono::{Duration, Timelike, Utc};
use sea_orm::entity::prelude::DateTimeWithTimeZone;

/// Placeholder principal used while the service has no authentication.
pub const SYSTEM_ACTOR: &str = "SYSTEM";

/// Identity recorded in `created_by` / `updated_by`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Actor(String);

impl Actor {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn system() -> Self {
        Self(SYSTEM_ACTOR.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Actor {
    fn default() -> Self {
        Self::system()
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Write {
    Insert,
    Update,
}

/// Mutable view over the audit columns of a row.
pub struct AuditFieldsMut<'a> {
    pub created_at: &'a mut DateTimeWithTimeZone,
    pub updated_at: &'a mut DateTimeWithTimeZone,
    pub created_by: &'a mut Option<String>,
    pub updated_by: &'a mut Option<String>,
    pub is_active: &'a mut bool,
}

pub trait Auditable {
    fn audit_fields(&mut self) -> AuditFieldsMut<'_>;
}

macro_rules! impl_auditable {
    ($($model:ty),+ $(,)?) => {
        $(
            impl Auditable for $model {
                fn audit_fields(&mut self) -> AuditFieldsMut<'_> {
                    AuditFieldsMut {
                        created_at: &mut self.created_at,
                        updated_at: &mut self.updated_at,
                        created_by: &mut self.created_by,
                        updated_by: &mut self.updated_by,
                        is_active: &mut self.is_active,
                    }
                }
            }
        )+
    };
}

impl_auditable!(
    crate::category::Model,
    crate::branch::Model,
    crate::product::Model,
    crate::product_variant::Model,
    crate::inventory::Model,
    crate::product_image::Model,
);

/// Current time truncated to microseconds.
pub fn now() -> DateTimeWithTimeZone {
    let now = Utc::now();
    let micros = now.nanosecond() / 1_000 * 1_000;
    now.with_nanosecond(micros).unwrap_or(now).into()
}

/// Apply audit columns for an insert or an update performed by `actor` at `now`.
pub fn stamp<T: Auditable>(mut entity: T, write: Write, actor: &Actor, now: DateTimeWithTimeZone) -> T {
    {
        let fields = entity.audit_fields();
        match write {
            Write::Insert => {
                *fields.created_at = now;
                *fields.updated_at = now;
                *fields.created_by = Some(actor.as_str().to_string());
                *fields.updated_by = Some(actor.as_str().to_string());
            }
            Write::Update => {
                let floor = *fields.updated_at + Duration::microseconds(1);
                let mut at = if now > floor { now } else { floor };
                if at < *fields.created_at {
                    at = *fields.created_at;
                }
                *fields.updated_at = at;
                *fields.updated_by = Some(actor.as_str().to_string());
            }
        }
    }
    entity
}

/// Flip the soft-delete flag. Returns whether the value changed.
pub fn set_active<T: Auditable>(entity: &mut T, active: bool) -> bool {
    let fields = entity.audit_fields();
    let changed = *fields.is_active != active;
    *fields.is_active = active;
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category;
    use uuid::Uuid;

    fn sample(at: DateTimeWithTimeZone) -> category::Model {
        category::Model {
            id: Uuid::new_v4(),
            name: "Rau củ quả".into(),
            description: None,
            parent_id: None,
            display_order: 0,
            created_at: at,
            updated_at: at,
            created_by: None,
            updated_by: None,
            is_active: true,
        }
    }

    #[test]
    fn insert_sets_both_timestamps_and_actors() {
        let t = now();
        let c = stamp(sample(t - Duration::days(1)), Write::Insert, &Actor::system(), t);
        assert_eq!(c.created_at, t);
        assert_eq!(c.updated_at, t);
        assert_eq!(c.created_by.as_deref(), Some(SYSTEM_ACTOR));
        assert_eq!(c.updated_by.as_deref(), Some(SYSTEM_ACTOR));
    }

    #[test]
    fn update_keeps_creation_fields() {
        let t0 = now();
        let c = stamp(sample(t0), Write::Insert, &Actor::new("alice"), t0);
        let t1 = t0 + Duration::seconds(5);
        let u = stamp(c, Write::Update, &Actor::new("bob"), t1);
        assert_eq!(u.created_at, t0);
        assert_eq!(u.created_by.as_deref(), Some("alice"));
        assert_eq!(u.updated_at, t1);
        assert_eq!(u.updated_by.as_deref(), Some("bob"));
    }

    #[test]
    fn update_in_same_tick_still_advances() {
        let t0 = now();
        let c = stamp(sample(t0), Write::Insert, &Actor::system(), t0);
        let u1 = stamp(c, Write::Update, &Actor::system(), t0);
        assert!(u1.updated_at > t0);
        let prev = u1.updated_at;
        let u2 = stamp(u1, Write::Update, &Actor::system(), t0 - Duration::seconds(1));
        assert!(u2.updated_at > prev);
        assert!(u2.updated_at >= u2.created_at);
    }

    #[test]
    fn now_has_microsecond_precision() {
        assert_eq!(now().nanosecond() % 1_000, 0);
    }

    #[test]
    fn set_active_reports_change() {
        let mut c = sample(now());
        assert!(!set_active(&mut c, true));
        assert!(set_active(&mut c, false));
        assert!(!c.is_active);
    }
}
