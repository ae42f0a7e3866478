//! Backend Entities
//!
//! Data structures matching backend records. Ids arrive as `_id`, all other
//! keys are camelCase.

mod organization;
mod reference;
mod revenue;
mod task;
mod user;

pub use organization::{Branch, Department, Kpi, KpiType, Role};
pub use reference::Reference;
pub use revenue::{AchievedEntry, RevenueTarget, TargetBranch};
pub use task::{Activity, Priority, Stage, SubTask, Task, TaskKpi};
pub use user::{AuthUser, PermissionGrant, User};

use crate::Entity;

macro_rules! impl_entity {
    ($($ty:ty),* $(,)?) => {
        $(impl Entity for $ty {
            fn id(&self) -> &str {
                &self.id
            }
        })*
    };
}

impl_entity!(Branch, Department, Kpi, Role, RevenueTarget, Task, User);
