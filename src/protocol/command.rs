#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Plugins,
    Themes,
    Update,
    Db,
    Downloads,
    Unknown,
}

impl From<&str> for Route {
    /// Maps a request path (no query string) to its route.
    fn from(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/api/v1/plugins" => Route::Plugins,
            "/api/v1/themes" => Route::Themes,
            "/api/v1/update" => Route::Update,
            "/_db" => Route::Db,
            p if p.starts_with("/downloads/") => Route::Downloads,
            _ => Route::Unknown,
        }
    }
}
