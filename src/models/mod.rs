pub mod item;
pub mod query;
pub mod record;

pub use item::*;
pub use query::*;
pub use record::{ChartPoint, GroupedTrend, PlatformStat, TrendRecord};
