use na_sources::SearchService;

pub struct AppState {
    pub search: SearchService,
}
