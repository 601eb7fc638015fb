//! Exchange trait tying together the payload types of one request pipeline.

use std::fmt::Debug;

/// The set of types a request pipeline hands to observers.
///
/// A registry, its observers and its supervisors all work over one
/// `Exchange`. Implement it on a zero-sized marker type:
///
/// ```rust,ignore
/// struct Api;
///
/// impl Exchange for Api {
///     type Error = ApiError;
///     type Request = http::Request<()>;
///     type Actor = User;
///     type Params = HashMap<String, String>;
/// }
/// ```
///
/// Pipelines without an actor or parameter concept use `()`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an `Exchange`",
    label = "missing `Exchange` implementation",
    note = "Declare the error, request, actor and params types of your pipeline on a marker type."
)]
pub trait Exchange: Send + Sync + 'static {
    /// The error a handling unit fails with.
    type Error: Debug + Send + Sync + 'static;
    /// The inbound request.
    type Request: Send + Sync + 'static;
    /// The identity associated with the request, if any.
    type Actor: Send + Sync + 'static;
    /// Parameters extracted from the request.
    type Params: Send + Sync + 'static;
}
