//! ============================================================================
//! Router - Declarative route table with connection and admin guards
//! ============================================================================
//! Static mapping from URL path to a page or a redirect. No dynamic route
//! generation. Guard order: connection first, then the admin allow-list,
//! then the holder gate.
//! ============================================================================

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::access::GateView;

/// Every addressable route in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Login,
    Home,
    About,
    Games,
    TokenPet,
    Spinner,
    Collectibles,
    Admin,
    HoneycombAdmin,
}

impl Route {
    /// The full static route table
    pub const ALL: &'static [Route] = &[
        Route::Login,
        Route::Home,
        Route::About,
        Route::Games,
        Route::TokenPet,
        Route::Spinner,
        Route::Collectibles,
        Route::Admin,
        Route::HoneycombAdmin,
    ];

    /// Parse a path, tolerating one trailing slash. Unknown paths fall to
    /// the catch-all in `resolve`.
    pub fn parse(path: &str) -> Option<Route> {
        let trimmed = if path.len() > 1 {
            path.strip_suffix('/').unwrap_or(path)
        } else {
            path
        };

        match trimmed {
            "/login" => Some(Route::Login),
            "/" => Some(Route::Home),
            "/about" => Some(Route::About),
            "/games" => Some(Route::Games),
            "/games/tokenpet" => Some(Route::TokenPet),
            "/games/spinner" => Some(Route::Spinner),
            "/collectibles" => Some(Route::Collectibles),
            "/admin" => Some(Route::Admin),
            "/honeycomb-admin" => Some(Route::HoneycombAdmin),
            _ => None,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Home => "/",
            Route::About => "/about",
            Route::Games => "/games",
            Route::TokenPet => "/games/tokenpet",
            Route::Spinner => "/games/spinner",
            Route::Collectibles => "/collectibles",
            Route::Admin => "/admin",
            Route::HoneycombAdmin => "/honeycomb-admin",
        }
    }

    /// Routes behind the admin allow-list
    fn requires_admin(&self) -> bool {
        matches!(self, Route::Admin | Route::HoneycombAdmin)
    }
}

/// Pages the view layer can render. The holder gate folds into this: member
/// routes render `Verifying`/`NonHolder` instead of their content while the
/// wallet is not a verified holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Landing,
    Verifying,
    NonHolder,
    Home,
    About,
    Games,
    TokenPet,
    Spinner,
    Collectibles,
    Admin,
    HoneycombAdmin,
}

impl Page {
    pub fn title(&self) -> &'static str {
        match self {
            Page::Landing => "Welcome",
            Page::Verifying => "Verifying",
            Page::NonHolder => "Members Only",
            Page::Home => "Clubhouse",
            Page::About => "About",
            Page::Games => "Games",
            Page::TokenPet => "Token Pet",
            Page::Spinner => "Prize Spinner",
            Page::Collectibles => "Collectibles",
            Page::Admin => "Admin",
            Page::HoneycombAdmin => "Honeycomb Admin",
        }
    }
}

/// Outcome of resolving a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolution {
    Render { page: Page },
    Redirect { to: Route },
}

/// Resolve a path against the gate state.
///
/// Unauthenticated requests for anything but `/login` redirect to `/login`;
/// authenticated requests for `/login` or an unknown path redirect to `/`.
pub fn resolve(path: &str, gate_view: GateView, is_admin: bool) -> Resolution {
    let connected = gate_view != GateView::Landing;

    let route = match Route::parse(path) {
        Some(route) => route,
        None => {
            // Catch-all
            let to = if connected { Route::Home } else { Route::Login };
            debug!("Unknown path '{}', redirecting to {}", path, to.path());
            return Resolution::Redirect { to };
        }
    };

    if !connected {
        return match route {
            Route::Login => Resolution::Render { page: Page::Landing },
            _ => Resolution::Redirect { to: Route::Login },
        };
    }

    if route == Route::Login {
        return Resolution::Redirect { to: Route::Home };
    }

    if route.requires_admin() {
        if !is_admin {
            debug!("Non-admin request for {}, redirecting home", route.path());
            return Resolution::Redirect { to: Route::Home };
        }
        let page = match route {
            Route::Admin => Page::Admin,
            _ => Page::HoneycombAdmin,
        };
        return Resolution::Render { page };
    }

    // Member routes: the holder gate decides what actually renders
    let page = match gate_view {
        GateView::Verifying => Page::Verifying,
        GateView::NonHolder => Page::NonHolder,
        _ => match route {
            Route::Home => Page::Home,
            Route::About => Page::About,
            Route::Games => Page::Games,
            Route::TokenPet => Page::TokenPet,
            Route::Spinner => Page::Spinner,
            Route::Collectibles => Page::Collectibles,
            Route::Login | Route::Admin | Route::HoneycombAdmin => unreachable!(),
        },
    };
    Resolution::Render { page }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_routes() {
        for route in Route::ALL {
            assert_eq!(Route::parse(route.path()), Some(*route));
        }
    }

    #[test]
    fn test_parse_trailing_slash() {
        assert_eq!(Route::parse("/about/"), Some(Route::About));
        assert_eq!(Route::parse("/games/spinner/"), Some(Route::Spinner));
        assert_eq!(Route::parse("/"), Some(Route::Home));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(Route::parse("/nope"), None);
        assert_eq!(Route::parse(""), None);
        assert_eq!(Route::parse("/games/unknown"), None);
    }

    #[test]
    fn test_unknown_path_unauthenticated_redirects_to_login() {
        let res = resolve("/does-not-exist", GateView::Landing, false);
        assert_eq!(res, Resolution::Redirect { to: Route::Login });
    }

    #[test]
    fn test_unknown_path_authenticated_redirects_home() {
        for view in [GateView::Verifying, GateView::Holder, GateView::NonHolder] {
            let res = resolve("/does-not-exist", view, false);
            assert_eq!(res, Resolution::Redirect { to: Route::Home });
        }
    }

    #[test]
    fn test_guarded_routes_redirect_to_login_when_disconnected() {
        for path in ["/", "/about", "/games", "/games/tokenpet", "/admin"] {
            let res = resolve(path, GateView::Landing, false);
            assert_eq!(res, Resolution::Redirect { to: Route::Login }, "path {}", path);
        }
    }

    #[test]
    fn test_login_renders_landing_when_disconnected() {
        let res = resolve("/login", GateView::Landing, false);
        assert_eq!(res, Resolution::Render { page: Page::Landing });
    }

    #[test]
    fn test_login_redirects_home_when_connected() {
        let res = resolve("/login", GateView::Holder, false);
        assert_eq!(res, Resolution::Redirect { to: Route::Home });
    }

    #[test]
    fn test_member_route_renders_verifying_while_unknown() {
        let res = resolve("/games", GateView::Verifying, false);
        assert_eq!(res, Resolution::Render { page: Page::Verifying });
    }

    #[test]
    fn test_member_route_renders_non_holder_view() {
        let res = resolve("/", GateView::NonHolder, false);
        assert_eq!(res, Resolution::Render { page: Page::NonHolder });
    }

    #[test]
    fn test_member_routes_render_for_holders() {
        let cases = [
            ("/", Page::Home),
            ("/about", Page::About),
            ("/games", Page::Games),
            ("/games/tokenpet", Page::TokenPet),
            ("/games/spinner", Page::Spinner),
            ("/collectibles", Page::Collectibles),
        ];
        for (path, page) in cases {
            assert_eq!(
                resolve(path, GateView::Holder, false),
                Resolution::Render { page },
                "path {}",
                path
            );
        }
    }

    #[test]
    fn test_admin_routes_require_allow_list() {
        for path in ["/admin", "/honeycomb-admin"] {
            assert_eq!(
                resolve(path, GateView::Holder, false),
                Resolution::Redirect { to: Route::Home },
                "path {}",
                path
            );
        }

        assert_eq!(
            resolve("/admin", GateView::Holder, true),
            Resolution::Render { page: Page::Admin }
        );
        assert_eq!(
            resolve("/honeycomb-admin", GateView::Holder, true),
            Resolution::Render { page: Page::HoneycombAdmin }
        );
    }

    #[test]
    fn test_admin_allowed_even_as_non_holder() {
        // The allow-list gates admin panels, not the token balance
        assert_eq!(
            resolve("/admin", GateView::NonHolder, true),
            Resolution::Render { page: Page::Admin }
        );
    }

    #[test]
    fn test_page_titles_are_nonempty() {
        let pages = [
            Page::Landing,
            Page::Verifying,
            Page::NonHolder,
            Page::Home,
            Page::About,
            Page::Games,
            Page::TokenPet,
            Page::Spinner,
            Page::Collectibles,
            Page::Admin,
            Page::HoneycombAdmin,
        ];
        for page in pages {
            assert!(!page.title().is_empty());
        }
    }
}
