//! Campaign data loading.
//!
//! - **delimited**: CSV/TSV exports with delimiter sniffing
//! - **frame**: Polars DataFrame to [`RawTable`](adkpi_model::RawTable)
//! - **platform**: Facebook and Google Ads API records

#![deny(unsafe_code)]

pub mod delimited;
pub mod error;
pub mod frame;
pub mod platform;

pub use delimited::{read_delimited, read_delimited_str, sniff_delimiter};
pub use error::{IngestError, Result};
pub use frame::raw_table_from_frame;
pub use platform::{
    FacebookAction, FacebookInsight, GoogleAdsRow, PLATFORM_COLUMN, Platform,
    facebook_insights_to_table, google_ads_rows_to_table, tag_platform,
};
