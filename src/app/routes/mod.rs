pub mod qa_article;

use crate::routes::registry::RouteModule;

/// Every application route module. New resources are registered above the marker.
pub fn modules() -> Vec<RouteModule> {
    #[allow(unused_mut)]
    let mut modules = vec![qa_article::module()];
    // swx:register
    modules
}
