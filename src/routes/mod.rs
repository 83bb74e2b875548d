/// Router Module Index
///
/// Splits the gate's routing into what it answers itself and what it hands to the
/// front-end bundle. Access control is not decided here: the route guard layer in
/// `create_router` sits in front of both and gates purely on the request path.

/// Routes answered by the gate itself (health probe).
pub mod public;

/// The built front-end bundle, served for every other path.
pub mod pages;
