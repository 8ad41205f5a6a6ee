pub use std::{sync::Arc, time::Duration};

pub use anyhow::Context;
pub use chrono::{DateTime, Utc};
pub use migration::MigratorTrait;
pub use sea_orm::{
  ActiveModelTrait, ColumnTrait, ConnectionTrait, Database, DatabaseConnection,
  EntityTrait, NotSet, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
  Set, TransactionTrait,
};
pub use tracing::{debug, error, info, warn};

pub use crate::error::{Error, Result, Submit};
