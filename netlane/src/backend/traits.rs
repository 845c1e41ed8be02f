use crate::model::{Route1Model, Route2Model};
use crate::response::Completion;
use crate::route::RequestDescriptor;

/// A mechanism that performs transfers for the two routes.
///
/// Implementations run the transfer wherever they like and feed the result
/// through [`handle_results`](crate::response::handle_results). The
/// completion may run on any thread, possibly before the call returns.
pub trait Backend: Send + Sync {
    /// Human-readable name, used in logs.
    fn name(&self) -> &str;

    fn handle_route1(&self, request: RequestDescriptor, completion: Completion<Route1Model>);

    fn handle_route2(&self, request: RequestDescriptor, completion: Completion<Route2Model>);
}
