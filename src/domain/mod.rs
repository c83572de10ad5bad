pub mod assessment;
pub mod claim;
pub mod evidence;
pub mod lenient;
pub mod policy;
pub mod route;

pub use assessment::{Assessment, Evaluation, MissingField, MissingFields};
pub use claim::{
    AssetDetails, ClaimRecord, IncidentDetails, InvolvedParties, MandatoryData, PolicyDetails,
};
pub use evidence::{Evidence, RuleResult};
pub use policy::{RoutingParams, RoutingPolicy};
pub use route::Route;
