use std::sync::LazyLock;

use axum::{extract::Request, middleware::Next, response::Response};
use axum_extra::{TypedHeader, headers::UserAgent};
use regex::Regex;

static MOBILE_USER_AGENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)iPhone|iPad|iPod|Android").expect("mobile user agent pattern is valid")
});

/// Client context stored in request extensions
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClientContext {
    pub is_mobile: bool,
}

impl ClientContext {
    pub fn from_user_agent(user_agent: Option<&str>) -> Self {
        Self {
            is_mobile: user_agent.is_some_and(|ua| MOBILE_USER_AGENT.is_match(ua)),
        }
    }
}

/// Tags every request with a [`ClientContext`] derived from its `User-Agent`.
pub async fn client_middleware(
    user_agent: Option<TypedHeader<UserAgent>>,
    mut req: Request,
    next: Next,
) -> Response {
    let context =
        ClientContext::from_user_agent(user_agent.as_ref().map(|TypedHeader(ua)| ua.as_str()));

    req.extensions_mut().insert(context);

    next.run(req).await
}
