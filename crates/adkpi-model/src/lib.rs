pub mod cell;
pub mod diagnostics;
pub mod error;
pub mod kpi;
pub mod normalized;
pub mod options;
pub mod schema;
pub mod table;

pub use cell::CellValue;
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use error::{ModelError, Result};
pub use kpi::{Kpi, KpiSet, KpiUnit};
pub use normalized::{ColumnData, ColumnOrigin, DateColumn, NormalizedColumn, NormalizedTable};
pub use options::{CollisionPolicy, NormalizationOptions, NumberLocale};
pub use schema::{CANONICAL_SCHEMA, CanonicalField, FieldKind};
pub use table::{RawColumn, RawTable};
