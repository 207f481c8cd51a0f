use std::cell::RefCell;
use std::rc::Rc;

use log::info;
use web_sys::Element;
use yew::prelude::*;

use crate::components::countdown::Countdown;
use crate::components::faq::FaqAccordion;
use crate::components::nav::anchor_onclick;
use crate::components::newsletter::Newsletter;
use crate::components::registration::RegistrationForm;
use crate::components::reveal::{entrance, together, use_reveal};
use crate::components::rocket::Rocket;
use crate::config;
use crate::motion::ease::Ease;
use crate::motion::player::{self, Playback};
use crate::motion::style::Style;
use crate::motion::timeline::{Position, Stagger, Step, Target, Timeline};

/// Hero entrance played once the splash screen is gone.
pub fn hero_entrance() -> Timeline {
    Timeline::new()
        .add(
            Step::from(
                Target::Selector(".hero-content > *"),
                Style::new().y(30.0).opacity(0.0),
                1.0,
            )
            .stagger(Stagger::Each(0.2)),
        )
        .add(
            Step::from(
                Target::Selector(".hero-image"),
                Style::new().x(100.0).opacity(0.0),
                1.2,
            )
            .at(Position::At(0.3)),
        )
}

pub const STATS: &[(&str, &str)] = &[
    ("48", "Hours of Hacking"),
    ("500+", "Participants"),
    ("$50K", "In Prizes"),
    ("30+", "Mentors"),
];

pub const CHALLENGES: &[(&str, &str, &str)] = &[
    (
        "fa-satellite",
        "Satellite Data",
        "Turn raw Earth-observation feeds into tools for climate, agriculture and disaster response.",
    ),
    (
        "fa-rocket",
        "Propulsion & Launch",
        "Model, simulate or optimise launch trajectories and reusable vehicle operations.",
    ),
    (
        "fa-space-shuttle",
        "Space Habitats",
        "Design systems that keep crews healthy and productive on long-duration missions.",
    ),
    (
        "fa-globe-americas",
        "Open Innovation",
        "Any idea that pushes space technology forward, from ground stations to orbital debris.",
    ),
];

pub const SCHEDULE: &[(&str, &str, &str)] = &[
    ("Day 1 · 10:00", "Opening Ceremony", "Welcome, keynote and challenge briefings."),
    ("Day 1 · 12:00", "Hacking Begins", "Teams form and start building."),
    ("Day 1 · 18:00", "Mentor Sessions", "One-on-one time with industry experts."),
    ("Day 2 · 14:00", "Checkpoint", "Progress reviews and workshop talks."),
    ("Day 3 · 10:00", "Submissions Close", "Final commits and demo preparation."),
    ("Day 3 · 14:00", "Demos & Awards", "Pitches to the jury and prize ceremony."),
];

pub const SPONSOR_TIERS: &[(&str, &[&str])] = &[
    ("Platinum", &["Orbital Dynamics", "StarForge"]),
    ("Gold", &["LunarNet", "Nebula Labs", "Apogee Systems"]),
];

pub const PARTNERS: &[&str] = &[
    "Cosmos Cloud",
    "Helix Aerospace",
    "Payload.io",
    "Zenith Robotics",
    "Perigee Ventures",
    "Vega Analytics",
];

pub const SOCIAL_LINKS: &[(&str, &str)] = &[
    ("fab fa-twitter", "Twitter"),
    ("fab fa-linkedin", "LinkedIn"),
    ("fab fa-github", "GitHub"),
    ("fab fa-discord", "Discord"),
];

#[derive(Properties, PartialEq)]
pub struct HeroProps {
    pub started: bool,
}

#[function_component(Hero)]
fn hero(props: &HeroProps) -> Html {
    let node = use_node_ref();
    let playback: Rc<RefCell<Option<Playback>>> = use_mut_ref(|| None);

    {
        let node = node.clone();
        use_effect_with_deps(
            move |started| {
                if let Some(root) = node.cast::<Element>() {
                    if *started {
                        info!("Playing hero entrance");
                        *playback.borrow_mut() =
                            Some(player::play(&hero_entrance(), Some(&root), None));
                    } else {
                        player::prepare(&hero_entrance(), Some(&root));
                    }
                }
                || ()
            },
            props.started,
        );
    }

    html! {
        <section class="hero" id="home" ref={node}>
            <div class="hero-content">
                <h1>{"Build the Future of "}<span class="highlight">{"Space"}</span></h1>
                <p class="subtitle">
                    {"48 hours. One mission. Join engineers, designers and dreamers to solve real challenges from orbit and beyond."}
                </p>
                <p class="date"><i class="far fa-calendar-alt"></i>{" August 13-15, 2025"}</p>
                <Countdown />
                <div class="hero-buttons">
                    <a href="#register" class="btn btn-primary" onclick={anchor_onclick("#register")}>
                        {"Register Now"}
                    </a>
                    <a href="#about" class="btn btn-secondary" onclick={anchor_onclick("#about")}>
                        {"Learn More"}
                    </a>
                </div>
            </div>
            <div class="hero-image">
                <img src="images/astronaut.svg" alt="Astronaut floating in space" />
            </div>
            <a href="#about" class="scroll-indicator" onclick={anchor_onclick("#about")} aria-label="Scroll down">
                <i class="fas fa-chevron-down"></i>
            </a>
        </section>
    }
}

#[function_component(About)]
fn about() -> Html {
    let node = use_node_ref();
    use_reveal(node.clone(), "top 80%", || {
        together(vec![
            entrance(".about-text", Style::new().x(-100.0).opacity(0.0), 1.0, 0.0),
            entrance(".about-image", Style::new().x(100.0).opacity(0.0), 1.0, 0.0),
        ])
    });

    html! {
        <section class="about" id="about" ref={node}>
            <div class="container">
                <div class="about-text">
                    <h2>{"About the "}{config::EVENT_NAME}</h2>
                    <p>
                        {"Three days of building with satellite data, launch simulations and life-support models alongside mentors from across the space industry."}
                    </p>
                    <p>
                        {"Whether you write firmware, train models or design interfaces, there is a mission for your team."}
                    </p>
                </div>
                <div class="about-image">
                    <img src="images/earth.svg" alt="Earth seen from orbit" />
                </div>
            </div>
        </section>
    }
}

#[function_component(Stats)]
fn stats() -> Html {
    let node = use_node_ref();
    use_reveal(node.clone(), "top 90%", || {
        Timeline::new().add(entrance(".stat-item", Style::new().y(30.0).opacity(0.0), 0.8, 0.2))
    });

    html! {
        <section class="stats" ref={node}>
            <div class="container">
                { for STATS.iter().map(|(value, label)| html! {
                    <div class="stat-item">
                        <span class="stat-number">{*value}</span>
                        <span class="stat-label">{*label}</span>
                    </div>
                }) }
            </div>
        </section>
    }
}

#[function_component(Challenges)]
fn challenges() -> Html {
    let node = use_node_ref();
    use_reveal(node.clone(), "top 80%", || {
        Timeline::new().add(entrance(".challenge-card", Style::new().y(50.0).opacity(0.0), 0.8, 0.1))
    });

    html! {
        <section class="challenges" id="challenges" ref={node}>
            <div class="container">
                <h2 class="section-title">{"Challenges"}</h2>
                <div class="challenges-grid">
                    { for CHALLENGES.iter().map(|(icon, title, text)| html! {
                        <div class="challenge-card">
                            <i class={classes!("fas", *icon)}></i>
                            <h3>{*title}</h3>
                            <p>{*text}</p>
                        </div>
                    }) }
                </div>
            </div>
        </section>
    }
}

#[function_component(Schedule)]
fn schedule() -> Html {
    let node = use_node_ref();
    use_reveal(node.clone(), "top 80%", || {
        Timeline::new().add(entrance(".timeline-item", Style::new().y(30.0).opacity(0.0), 0.8, 0.2))
    });

    html! {
        <section class="schedule" id="schedule" ref={node.clone()}>
            <div class="container">
                <h2 class="section-title">{"Mission Timeline"}</h2>
                <div class="schedule-layout">
                    <div class="timeline">
                        { for SCHEDULE.iter().map(|(when, title, text)| html! {
                            <div class="timeline-item">
                                <span class="timeline-time">{*when}</span>
                                <h3>{*title}</h3>
                                <p>{*text}</p>
                            </div>
                        }) }
                    </div>
                    <Rocket section={node} />
                </div>
            </div>
        </section>
    }
}

#[function_component(Sponsors)]
fn sponsors() -> Html {
    let node = use_node_ref();
    let grid = use_node_ref();
    use_reveal(node.clone(), "top 80%", || {
        Timeline::new().add(entrance(".sponsor-tier", Style::new().y(30.0).opacity(0.0), 0.8, 0.2))
    });
    use_reveal(grid.clone(), "top 85%", || {
        Timeline::new().add(
            entrance(".sponsor-logo", Style::new().scale(0.8).opacity(0.0), 0.6, 0.1)
                .ease(Ease::BackOut(1.7)),
        )
    });

    html! {
        <section class="sponsors" id="sponsors" ref={node}>
            <div class="container">
                <h2 class="section-title">{"Sponsors"}</h2>
                { for SPONSOR_TIERS.iter().map(|(tier, names)| html! {
                    <div class="sponsor-tier">
                        <h3>{*tier}</h3>
                        <ul>
                            { for names.iter().map(|name| html! { <li>{*name}</li> }) }
                        </ul>
                    </div>
                }) }
                <div class="sponsors-grid" ref={grid}>
                    { for PARTNERS.iter().map(|name| html! {
                        <div class="sponsor-logo">{*name}</div>
                    }) }
                </div>
            </div>
        </section>
    }
}

#[function_component(FaqSection)]
fn faq_section() -> Html {
    let node = use_node_ref();
    use_reveal(node.clone(), "top 80%", || {
        Timeline::new().add(entrance(".faq-item", Style::new().y(30.0).opacity(0.0), 0.8, 0.1))
    });

    html! {
        <section class="faq" id="faq" ref={node}>
            <div class="container">
                <h2 class="section-title">{"Frequently Asked Questions"}</h2>
                <FaqAccordion />
            </div>
        </section>
    }
}

#[function_component(Register)]
fn register() -> Html {
    let node = use_node_ref();
    use_reveal(node.clone(), "top 80%", || {
        together(vec![
            entrance(".register-text", Style::new().x(-50.0).opacity(0.0), 0.8, 0.0),
            entrance(".register-form", Style::new().x(50.0).opacity(0.0), 0.8, 0.0),
        ])
    });

    html! {
        <section class="register" id="register" ref={node}>
            <div class="container">
                <div class="register-text">
                    <h2>{"Ready for Launch?"}</h2>
                    <p>{"Registration is free. Sign up alone or with a team of up to four."}</p>
                    <ul>
                        <li><i class="fas fa-check"></i>{" Meals and swag included"}</li>
                        <li><i class="fas fa-check"></i>{" Access to mission datasets"}</li>
                        <li><i class="fas fa-check"></i>{" Mentorship from industry experts"}</li>
                    </ul>
                </div>
                <RegistrationForm />
            </div>
        </section>
    }
}

#[function_component(Footer)]
fn footer() -> Html {
    html! {
        <footer class="footer">
            <div class="container">
                <div class="footer-brand">
                    <i class="fas fa-rocket"></i>
                    <span>{config::EVENT_NAME}</span>
                </div>
                <div class="footer-newsletter">
                    <h4>{"Mission Updates"}</h4>
                    <Newsletter />
                </div>
                <div class="social-links">
                    { for SOCIAL_LINKS.iter().map(|(icon, label)| html! {
                        <a href="#" class="social-link" aria-label={*label} onclick={anchor_onclick("#")}>
                            <i class={*icon}></i>
                        </a>
                    }) }
                </div>
                <p class="copyright">{format!("© 2025 {}. All rights reserved.", config::EVENT_NAME)}</p>
            </div>
        </footer>
    }
}

/// Provided by the app root; `true` once the splash screen has finished.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Loaded(pub bool);

#[function_component(Landing)]
pub fn landing() -> Html {
    let loaded = use_context::<Loaded>().unwrap_or_default();
    html! {
        <main class="landing">
            <style>
                {r#"
                    .landing section {
                        position: relative;
                        z-index: 1;
                    }
                    .faq-answer {
                        overflow: hidden;
                    }
                    .rocket-3d {
                        cursor: pointer;
                        will-change: transform, opacity;
                    }
                    .rocket-exhaust {
                        transition: opacity 0.3s ease;
                    }
                    .custom-cursor,
                    .cursor-dot {
                        position: fixed;
                        top: 0;
                        left: 0;
                        pointer-events: none;
                        z-index: 10000;
                    }
                    .custom-cursor {
                        width: 32px;
                        height: 32px;
                        margin: -16px 0 0 -16px;
                        border: 2px solid rgba(255, 255, 255, 0.6);
                        border-radius: 50%;
                    }
                    .cursor-dot {
                        width: 6px;
                        height: 6px;
                        margin: -3px 0 0 -3px;
                        background: #fff;
                        border-radius: 50%;
                    }
                    .custom-cursor.active {
                        width: 48px;
                        height: 48px;
                        margin: -24px 0 0 -24px;
                    }
                    .event-started {
                        font-size: 1.5rem;
                        font-weight: 600;
                    }
                "#}
            </style>
            <Hero started={loaded.0} />
            <About />
            <Stats />
            <Challenges />
            <Schedule />
            <Sponsors />
            <FaqSection />
            <Register />
            <Footer />
        </main>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hero_image_trails_the_text() {
        let tl = hero_entrance();
        let slots = tl.schedule(&[5, 1]);
        assert_eq!(slots[0].start, 0.0);
        assert_eq!(slots[0].delays.len(), 5);
        assert!((slots[0].delays[4] - 0.8).abs() < 1e-9);
        assert_eq!(slots[1].start, 0.3);
    }

    #[test]
    fn hero_entrance_starts_hidden() {
        let tl = hero_entrance();
        for step in tl.steps() {
            assert_eq!(step.from.as_ref().and_then(|s| s.opacity), Some(0.0));
            assert_eq!(step.to.opacity, Some(1.0));
        }
    }
}
