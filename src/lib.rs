pub mod api;
pub mod batch;
pub mod config;
pub mod domain;
pub mod intake;
pub mod observability;
pub mod policy;
pub mod rules;

pub use config::Config;
pub use domain::{Assessment, ClaimRecord, Evaluation, MissingField, Route};
pub use rules::{assess, RoutingRule, RuleSet};
