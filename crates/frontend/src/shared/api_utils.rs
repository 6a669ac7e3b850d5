//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

/// Backend port; the API is always served from it
pub const API_PORT: u16 = 3000;

/// Versioned API prefix
pub const API_PREFIX: &str = "/api/v1/";

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using port 3000 for the backend server.
///
/// # Returns
/// - API base URL like "http://localhost:3000/api/v1/"
/// - Just the prefix if window is not available
pub fn api_base() -> String {
    let Some(window) = web_sys::window() else {
        return API_PREFIX.to_string();
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}{}", protocol, hostname, API_PORT, API_PREFIX)
}

/// Build a full API URL from a path relative to `/api/v1/`
///
/// # Example
/// ```ignore
/// let url = api_url("Departments/Count");
/// ```
pub fn api_url(path: &str) -> String {
    join_url(&api_base(), path)
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url_normalizes_slashes() {
        let base = "http://localhost:3000/api/v1/";
        assert_eq!(
            join_url(base, "Departments/Count"),
            "http://localhost:3000/api/v1/Departments/Count"
        );
        assert_eq!(
            join_url(base, "/Departments"),
            "http://localhost:3000/api/v1/Departments"
        );
    }
}
