#![allow(dead_code)]

use breakfall::{ActorProvider, Exchange, HandlerId, HandlingUnit, UnitName};

// ============================================================================
// Test Exchange
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: &'static str,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub name: String,
}

pub type Params = Vec<(String, String)>;

#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    NotFound(String),
    Database(&'static str),
}

pub struct TestApp;

impl Exchange for TestApp {
    type Error = AppError;
    type Request = Request;
    type Actor = User;
    type Params = Params;
}

// ============================================================================
// Handling Units
// ============================================================================

pub struct Session {
    pub user: Option<User>,
}

impl ActorProvider<TestApp> for Session {
    fn current_actor(&self) -> Option<&User> {
        self.user.as_ref()
    }
}

/// A controller-like unit with a request, params and a signed-in user.
pub struct DummyController {
    pub request: Request,
    pub params: Params,
    pub session: Session,
}

impl UnitName for DummyController {
    const NAME: &'static str = "DummyController";
}

impl HandlingUnit<TestApp> for DummyController {
    fn handler_id(&self) -> HandlerId {
        HandlerId::of::<Self>()
    }

    fn request(&self) -> Option<&Request> {
        Some(&self.request)
    }

    fn params(&self) -> Option<&Params> {
        Some(&self.params)
    }

    fn actor_provider(&self) -> Option<&dyn ActorProvider<TestApp>> {
        Some(&self.session)
    }
}

impl DummyController {
    pub fn new() -> Self {
        Self {
            request: Request {
                method: "GET",
                path: "/dummy/42".into(),
            },
            params: vec![("id".into(), "42".into())],
            session: Session {
                user: Some(User {
                    name: "alice".into(),
                }),
            },
        }
    }

    pub fn anonymous() -> Self {
        Self {
            session: Session { user: None },
            ..Self::new()
        }
    }

    /// Fails, but recovers from the failure itself.
    pub fn rescued(&self) -> Result<&'static str, AppError> {
        match self.lookup() {
            Ok(found) => Ok(found),
            Err(AppError::NotFound(_)) => Ok("fallback"),
            Err(other) => Err(other),
        }
    }

    /// Fails and lets the error escape.
    pub fn failing(&self) -> Result<&'static str, AppError> {
        self.lookup()
    }

    pub fn succeeding(&self) -> Result<&'static str, AppError> {
        Ok("ok")
    }

    fn lookup(&self) -> Result<&'static str, AppError> {
        Err(AppError::NotFound(self.request.path.clone()))
    }
}

pub struct OtherController;

impl UnitName for OtherController {
    const NAME: &'static str = "OtherController";
}

impl HandlingUnit<TestApp> for OtherController {
    fn handler_id(&self) -> HandlerId {
        HandlerId::of::<Self>()
    }
}
