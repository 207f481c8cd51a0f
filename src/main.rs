use log::info;
use yew::prelude::*;
use yew_router::prelude::*;

mod config;
mod dom;
mod motion {
    pub mod ease;
    pub mod frame;
    pub mod player;
    pub mod style;
    pub mod timeline;
}
mod scroll {
    pub mod hooks;
    pub mod scrub;
    pub mod trigger;
}
mod components {
    pub mod countdown;
    pub mod cursor;
    pub mod faq;
    pub mod loading_screen;
    pub mod nav;
    pub mod newsletter;
    pub mod registration;
    pub mod reveal;
    pub mod rocket;
    pub mod starfield;
}
mod pages {
    pub mod landing;
}

use components::{
    cursor::Cursor,
    loading_screen::LoadingScreen,
    nav::Nav,
    starfield::Starfield,
};
use pages::landing::{Landing, Loaded};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Landing page");
            html! { <Landing /> }
        }
        Route::NotFound => {
            info!("Unknown path, redirecting home");
            html! { <Redirect<Route> to={Route::Home} /> }
        }
    }
}

#[function_component]
fn App() -> Html {
    let loaded = use_state_eq(|| false);

    let on_finished = {
        let loaded = loaded.clone();
        Callback::from(move |_: ()| loaded.set(true))
    };

    html! {
        <BrowserRouter>
            <ContextProvider<Loaded> context={Loaded(*loaded)}>
                <LoadingScreen {on_finished} />
                <Starfield />
                <Cursor />
                <Nav />
                <Switch<Route> render={switch} />
            </ContextProvider<Loaded>>
        </BrowserRouter>
    }
}

fn main() {
    console_error_panic_hook::set_once();

    if let Err(e) = console_log::init_with_level(config::log_level()) {
        gloo_console::error!(format!("error initializing log: {}", e));
    }

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
