//! Offer ranking: relevance scoring, price outlier flagging, store
//! trust adjustment.
//!
//! These passes run in order over the pooled offers: the scorer marks
//! relevance against the query profile, the outlier filter flags
//! suspicious prices inside the relevant set, and the trust adjuster
//! computes the effective price used for best-offer selection.

pub mod outliers;
pub mod relevance;
pub mod trust;
