//! The invocation context handed to observers.

use crate::{exchange::Exchange, handler_id::HandlerId};
use std::fmt;

/// One unhandled error together with the request context it escaped from.
///
/// An `Incident` only borrows its payload. It lives for the duration of one
/// dispatch call and observers must not assume it outlives `on_error`.
///
/// # Example
///
/// ```rust,ignore
/// let incident = Incident::<Api>::new(&err)
///     .with_request(&request)
///     .with_params(&params)
///     .with_handler_id("UsersController");
///
/// registry.dispatch(&incident);
/// ```
pub struct Incident<'a, X: Exchange> {
    error: &'a X::Error,
    request: Option<&'a X::Request>,
    actor: Option<&'a X::Actor>,
    params: Option<&'a X::Params>,
    handler_id: Option<HandlerId>,
}

impl<'a, X: Exchange> Incident<'a, X> {
    /// Create an incident carrying only the error.
    pub fn new(error: &'a X::Error) -> Self {
        Self {
            error,
            request: None,
            actor: None,
            params: None,
            handler_id: None,
        }
    }

    /// Attach the request.
    pub fn with_request(mut self, request: &'a X::Request) -> Self {
        self.request = Some(request);
        self
    }

    /// Attach the actor.
    pub fn with_actor(mut self, actor: &'a X::Actor) -> Self {
        self.actor = Some(actor);
        self
    }

    /// Attach an actor that may be absent.
    pub fn with_actor_opt(mut self, actor: Option<&'a X::Actor>) -> Self {
        self.actor = actor;
        self
    }

    /// Attach the request parameters.
    pub fn with_params(mut self, params: &'a X::Params) -> Self {
        self.params = Some(params);
        self
    }

    /// Attach the identifier of the handling unit.
    ///
    /// An empty id is stored as no id.
    pub fn with_handler_id(mut self, handler_id: impl Into<HandlerId>) -> Self {
        let handler_id = handler_id.into();
        self.handler_id = (!handler_id.is_empty()).then_some(handler_id);
        self
    }

    /// The unhandled error.
    pub fn error(&self) -> &'a X::Error {
        self.error
    }

    /// The request, if the pipeline supplied one.
    pub fn request(&self) -> Option<&'a X::Request> {
        self.request
    }

    /// The actor, if the handling unit exposes one.
    pub fn actor(&self) -> Option<&'a X::Actor> {
        self.actor
    }

    /// The request parameters, if supplied.
    pub fn params(&self) -> Option<&'a X::Params> {
        self.params
    }

    /// The handling unit's identifier, if supplied and non-empty.
    pub fn handler_id(&self) -> Option<&HandlerId> {
        self.handler_id.as_ref()
    }
}

impl<X: Exchange> Clone for Incident<'_, X> {
    fn clone(&self) -> Self {
        Self {
            error: self.error,
            request: self.request,
            actor: self.actor,
            params: self.params,
            handler_id: self.handler_id.clone(),
        }
    }
}

impl<X: Exchange> fmt::Debug for Incident<'_, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Incident")
            .field("error", self.error)
            .field("request", &self.request.is_some())
            .field("actor", &self.actor.is_some())
            .field("params", &self.params.is_some())
            .field("handler_id", &self.handler_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain;

    impl Exchange for Plain {
        type Error = String;
        type Request = &'static str;
        type Actor = u64;
        type Params = Vec<(String, String)>;
    }

    #[test]
    fn test_incident_borrows_payload() {
        let error = String::from("boom");
        let request = "/users/1";
        let params = vec![("id".to_string(), "1".to_string())];

        let incident = Incident::<Plain>::new(&error)
            .with_request(&request)
            .with_params(&params)
            .with_handler_id("UsersController");

        assert!(std::ptr::eq(incident.error(), &error));
        assert!(std::ptr::eq(incident.params().unwrap(), &params));
        assert_eq!(*incident.request().unwrap(), "/users/1");
        assert!(incident.actor().is_none());
        assert_eq!(incident.handler_id().unwrap(), "UsersController");
    }

    #[test]
    fn test_empty_handler_id_is_none() {
        let error = String::from("boom");
        let incident = Incident::<Plain>::new(&error).with_handler_id("");
        assert!(incident.handler_id().is_none());
    }

    #[test]
    fn test_actor_opt() {
        let error = String::from("boom");
        let actor = 7u64;
        let incident = Incident::<Plain>::new(&error).with_actor_opt(Some(&actor));
        assert_eq!(incident.actor(), Some(&7));
        let incident = incident.with_actor_opt(None);
        assert_eq!(incident.actor(), None);
    }
}
