use log::{debug, warn};
use web_sys::{Event, HtmlElement, MouseEvent, ScrollBehavior, ScrollToOptions};
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::config;
use crate::dom::{self, DomResult};
use crate::motion::ease::Ease;
use crate::motion::player;
use crate::motion::style::Style;

/// Mobile menu open/closed state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavMenu {
    open: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavEvent {
    Toggle,
    LinkClicked,
    OutsideClick,
}

impl NavMenu {
    pub fn apply(self, event: NavEvent) -> Self {
        match event {
            NavEvent::Toggle => Self { open: !self.open },
            NavEvent::LinkClicked | NavEvent::OutsideClick => Self { open: false },
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

/// Target styles for the three burger bars; open draws an "X".
pub fn bar_styles(open: bool) -> [Style; 3] {
    if open {
        [
            Style::new().rotation(45.0).y(9.0),
            Style::new().opacity(0.0),
            Style::new().rotation(-45.0).y(-9.0),
        ]
    } else {
        [
            Style::new().rotation(0.0).y(0.0),
            Style::new().opacity(1.0),
            Style::new().rotation(0.0).y(0.0),
        ]
    }
}

pub const NAV_LINKS: &[(&str, &str)] = &[
    ("#about", "About"),
    ("#challenges", "Challenges"),
    ("#schedule", "Schedule"),
    ("#sponsors", "Sponsors"),
    ("#faq", "FAQ"),
    ("#register", "Register"),
];

/// The id an in-page link points at. Bare `#` and external links have none.
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// A section's id with its vertical extent in document coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

/// The section the reader is in. Sections count as current slightly before
/// they reach the top; when several match the last one wins.
pub fn active_section(sections: &[SectionBounds], scroll_y: f64) -> Option<&str> {
    sections
        .iter()
        .filter(|s| {
            let top = s.top - config::NAV_SECTION_OFFSET;
            scroll_y >= top && scroll_y < top + s.height
        })
        .last()
        .map(|s| s.id.as_str())
}

fn section_bounds() -> DomResult<Vec<SectionBounds>> {
    Ok(dom::query_all(None, "section")?
        .into_iter()
        .filter(|el| !el.id().is_empty())
        .map(|el| SectionBounds {
            id: el.id(),
            top: el.offset_top() as f64,
            height: el.offset_height() as f64,
        })
        .collect())
}

/// Smoothly scrolls to the element `href` names, leaving room for the fixed
/// header.
pub fn scroll_to_anchor(href: &str) -> DomResult<()> {
    let Some(id) = anchor_target(href) else {
        return Ok(());
    };
    let target = dom::by_id(id)?;
    let header_height = dom::query("header")
        .map(|header| header.offset_height() as f64)
        .unwrap_or(0.0);
    let top = target.get_bounding_client_rect().top() + dom::scroll_y()? - header_height;
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    dom::window()?.scroll_to_with_scroll_to_options(&options);
    Ok(())
}

/// Click handler for in-page links that scrolls instead of jumping.
pub fn anchor_onclick(href: &'static str) -> Callback<MouseEvent> {
    Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        if let Err(e) = scroll_to_anchor(href) {
            warn!("could not scroll to {}: {}", href, e);
        }
    })
}

#[function_component(Nav)]
pub fn nav() -> Html {
    let menu = use_state_eq(NavMenu::default);
    let (_, scroll_y) = use_window_scroll();
    let nav_ref = use_node_ref();
    let bar_refs = [use_node_ref(), use_node_ref(), use_node_ref()];

    {
        let menu = menu.clone();
        use_click_away(nav_ref.clone(), move |_: Event| {
            menu.set(menu.apply(NavEvent::OutsideClick));
        });
    }

    {
        let bar_refs = bar_refs.clone();
        use_effect_with_deps(
            move |open| {
                for (bar, style) in bar_refs.iter().zip(bar_styles(*open).iter()) {
                    if let Some(bar) = bar.cast::<HtmlElement>() {
                        if let Err(e) = player::tween(&bar, style, 0.3, Ease::Power2Out) {
                            debug!("burger bar animation skipped: {}", e);
                        }
                    }
                }
                || ()
            },
            menu.is_open(),
        );
    }

    let toggle = {
        let menu = menu.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu.set(menu.apply(NavEvent::Toggle));
        })
    };

    let current = section_bounds()
        .ok()
        .and_then(|sections| active_section(&sections, scroll_y).map(str::to_string));
    let scrolled = scroll_y > config::HEADER_SCROLLED_AT;
    let open = menu.is_open();

    html! {
        <header class={classes!(scrolled.then(|| "scrolled"))}>
            <nav class="navbar" ref={nav_ref}>
                <a href="#" class="logo" onclick={anchor_onclick("#")}>
                    <i class="fas fa-rocket"></i>
                    <span>{config::EVENT_NAME}</span>
                </a>
                <ul class={classes!("nav-links", open.then(|| "active"))}>
                    { for NAV_LINKS.iter().map(|(href, label)| {
                        let is_current = anchor_target(href) == current.as_deref();
                        let onclick = {
                            let menu = menu.clone();
                            let scroll = anchor_onclick(*href);
                            Callback::from(move |e: MouseEvent| {
                                menu.set(menu.apply(NavEvent::LinkClicked));
                                scroll.emit(e);
                            })
                        };
                        html! {
                            <li>
                                <a href={*href} class={classes!(is_current.then(|| "active"))} {onclick}>
                                    {*label}
                                </a>
                            </li>
                        }
                    }) }
                </ul>
                <button
                    class={classes!("nav-toggle", open.then(|| "active"))}
                    aria-label="Toggle navigation"
                    aria-expanded={open.to_string()}
                    onclick={toggle}
                >
                    <span class="bar" ref={bar_refs[0].clone()}></span>
                    <span class="bar" ref={bar_refs[1].clone()}></span>
                    <span class="bar" ref={bar_refs[2].clone()}></span>
                </button>
            </nav>
        </header>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_opens_then_closes() {
        let menu = NavMenu::default().apply(NavEvent::Toggle);
        assert!(menu.is_open());
        assert!(!menu.apply(NavEvent::Toggle).is_open());
    }

    #[test]
    fn outside_click_closes() {
        let menu = NavMenu::default()
            .apply(NavEvent::Toggle)
            .apply(NavEvent::OutsideClick);
        assert!(!menu.is_open());
    }

    #[test]
    fn link_click_always_closes() {
        assert!(!NavMenu::default().apply(NavEvent::LinkClicked).is_open());
        let open = NavMenu::default().apply(NavEvent::Toggle);
        assert!(!open.apply(NavEvent::LinkClicked).is_open());
    }

    #[test]
    fn bars_form_an_x_when_open() {
        let [top, middle, bottom] = bar_styles(true);
        assert_eq!(top.rotation, Some(45.0));
        assert_eq!(middle.opacity, Some(0.0));
        assert_eq!(bottom.y, Some(-9.0));
        let [top, middle, _] = bar_styles(false);
        assert_eq!(top.rotation, Some(0.0));
        assert_eq!(middle.opacity, Some(1.0));
    }

    #[test]
    fn anchor_targets() {
        assert_eq!(anchor_target("#faq"), Some("faq"));
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target("https://example.com"), None);
    }

    #[test]
    fn bare_hash_link_scrolls_nowhere() {
        assert!(scroll_to_anchor("#").is_ok());
    }

    fn sections() -> Vec<SectionBounds> {
        vec![
            SectionBounds { id: "about".into(), top: 800.0, height: 600.0 },
            SectionBounds { id: "schedule".into(), top: 1400.0, height: 900.0 },
        ]
    }

    #[test]
    fn active_section_uses_offset() {
        assert_eq!(active_section(&sections(), 0.0), None);
        assert_eq!(active_section(&sections(), 700.0), Some("about"));
        assert_eq!(active_section(&sections(), 1299.0), Some("about"));
        assert_eq!(active_section(&sections(), 1300.0), Some("schedule"));
        assert_eq!(active_section(&sections(), 2300.0), None);
    }
}
