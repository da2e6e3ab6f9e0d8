#![allow(missing_docs)]

pub mod catalog;
pub mod condition;
pub mod config;
pub mod data;
pub mod eligibility;
pub mod field;
pub mod income;
pub mod money;
pub mod navigation;
pub mod preparers;
pub mod scope;
pub mod validate;
pub mod view;

pub use condition::{CompositeCondition, Condition, LeafCondition, LogicalOperator, Matcher};
pub use config::{
    CountyInstructions, DerivedValueConfig, DerivedValueSource, InputConfig, InputType, PageConfig, PageDatasource,
    PageGroupConfig, PagesConfig, ScopeDefinition,
};
pub use data::{ApplicationData, InputData, Iteration, PageData, PagesData, Subworkflow};
pub use eligibility::{Eligibility, decide};
pub use field::{Document, DocumentField, DocumentFieldType, Recipient};
pub use money::{Money, MoneyError};
pub use navigation::NavigationError;
pub use preparers::{DocumentFieldPipeline, DocumentFieldPreparer};
pub use scope::{IterationScopeInfo, IterationScopeTracker};
pub use validate::{ConfigIssue, ConfigValidation, validate_config};
pub use view::{LayeredPages, PageLookup};
