//! Define our own macro to simplify the code
//!
//! Every call carries our `user-agent` and the per-route timeout.
//!

/// Call the HTTP client with the proper arguments
///
/// - unauth call to fetch some data
///
#[macro_export]
macro_rules! http_get {
    ($self:ident, $url:expr, $timeout:expr) => {
        $self
            .client
            .get($url)
            .header(
                "user-agent",
                format!("{}/{}", crate_name!(), crate_version!()),
            )
            .timeout($timeout)
            .send()
    };
}

/// Call the HTTP client with the proper arguments
///
/// - auth call to fetch data with a query string
///
#[macro_export]
macro_rules! http_get_auth {
    ($self:ident, $url:expr, $token:expr, $query:expr, $timeout:expr) => {
        $self
            .client
            .get($url)
            .header(
                "user-agent",
                format!("{}/{}", crate_name!(), crate_version!()),
            )
            .bearer_auth($token)
            .query($query)
            .timeout($timeout)
            .send()
    };
}

/// Call the HTTP client with the proper arguments
///
/// - unauth call to fetch token by submitting credentials as a form
///
#[macro_export]
macro_rules! http_post_form {
    ($self:ident, $url:expr, $form:expr, $timeout:expr) => {
        $self
            .client
            .post($url)
            .header(
                "user-agent",
                format!("{}/{}", crate_name!(), crate_version!()),
            )
            .form($form)
            .timeout($timeout)
            .send()
    };
}
