use corredor_routing::router::Router;

pub struct AppState<G> {
    pub router: Router<G>,
}
