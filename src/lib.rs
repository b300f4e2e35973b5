pub mod config;
pub mod gateway;
pub mod gesture;
pub mod model;
pub mod motion;
pub mod navigation;
pub mod presenter;
pub mod session;
pub mod swipe;

use config::{GatewayConfig, FALLBACK_SCREEN_WIDTH, FRAME_MS, PLACEHOLDER_USER_ID};
use futures::future::join;
use gateway::{DataGateway, SupabaseGateway};
use log::{error, info};
use model::{Candidate, Direction, RecordId};
use motion::frame_delta;
use navigation::{Navigator, Screen, Tab};
use presenter::{
    bids_placed_summary, format_amount, name_and_age, testimonials, CardStyle, ALL_DONE_TITLE,
    APP_TITLE, BID_BADGE_LABEL, DETAIL_CONS, DETAIL_INTERESTS, DETAIL_LOCATION, DETAIL_OCCUPATION,
    DETAIL_PROS, GALLERY_SIZE, LOADING_MESSAGE, PASS_BADGE_LABEL, PROFILE_PLACEHOLDER,
};
use session::{load_candidates, load_prior_bids, Phase, SessionController};
use std::cell::RefCell;
use std::rc::Rc;
use swipe::SwipeEngine;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::window;
use yew::prelude::*;

#[derive(Clone, PartialEq)]
enum DetailStatus {
    Loading,
    Loaded(Candidate),
    Unavailable,
}

#[function_component(App)]
fn app() -> Html {
    let gateway = use_memo(|_| SupabaseGateway::new(GatewayConfig::from_env()), ());
    let session = use_mut_ref(|| SessionController::new(PLACEHOLDER_USER_ID));
    let engine = use_mut_ref(|| SwipeEngine::new(screen_width()));
    let navigator = use_state(Navigator::new);
    let animating = use_state(|| false);
    let redraw = use_force_update();

    {
        let gateway = gateway.clone();
        let session = session.clone();
        let redraw = redraw.clone();

        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    let (candidates, bids) =
                        join(load_candidates(&*gateway), load_prior_bids(&*gateway)).await;
                    session.borrow_mut().finish_loading(candidates, bids);
                    redraw.force_update();
                });

                || ()
            },
            (),
        );
    }

    let on_swipe = {
        let gateway = gateway.clone();
        let session = session.clone();
        let redraw = redraw.clone();

        Callback::from(move |direction: Direction| {
            let pending = session.borrow_mut().advance(direction);
            redraw.force_update();

            let Some(bid) = pending else {
                return;
            };

            let gateway = gateway.clone();
            let session = session.clone();
            let redraw = redraw.clone();
            spawn_local(async move {
                let result = gateway.insert_bid(&bid).await;
                session.borrow_mut().settle_bid(bid, result);
                redraw.force_update();
            });
        })
    };

    {
        let engine = engine.clone();
        let animating_handle = animating.clone();
        let on_swipe = on_swipe.clone();
        let redraw = redraw.clone();

        use_effect_with_deps(
            move |running: &bool| {
                let mut interval = None;
                if *running {
                    let mut last_frame = now_ms();
                    let tick = Closure::<dyn FnMut()>::new(move || {
                        let frame = now_ms();
                        let elapsed = frame_delta(last_frame, frame);
                        last_frame = frame;
                        let committed = engine.borrow_mut().tick(elapsed);
                        let still_running = engine.borrow().is_animating();
                        if let Some(direction) = committed {
                            on_swipe.emit(direction);
                        }
                        if !still_running {
                            animating_handle.set(false);
                        }
                        redraw.force_update();
                    });
                    interval = start_interval(&tick).map(|handle| (handle, tick));
                }

                move || {
                    if let Some((handle, tick)) = interval {
                        if let Some(window) = window() {
                            window.clear_interval_with_handle(handle);
                        }
                        // Cleanup can run from inside the tick itself.
                        spawn_local(async move { drop(tick) });
                    }
                }
            },
            *animating,
        );
    }

    let on_open_detail = {
        let navigator = navigator.clone();
        Callback::from(move |id: RecordId| {
            let mut next = (*navigator).clone();
            next.push_detail(id);
            navigator.set(next);
        })
    };

    let on_back = {
        let navigator = navigator.clone();
        Callback::from(move |_: ()| {
            let mut next = (*navigator).clone();
            if next.back() {
                navigator.set(next);
            }
        })
    };

    let on_select_tab = {
        let navigator = navigator.clone();
        Callback::from(move |tab: Tab| {
            let mut next = (*navigator).clone();
            next.select_tab(tab);
            navigator.set(next);
        })
    };

    let screen = match navigator.current() {
        Screen::Tab(Tab::Home) => render_home(
            &session.borrow(),
            &engine,
            &animating,
            &redraw,
            &on_swipe,
            &on_open_detail,
        ),
        Screen::Tab(Tab::Profile) => render_profile(),
        Screen::Detail(id) => html! {
            <CandidateDetail
                {id}
                gateway={gateway.clone()}
                user_id={session.borrow().user_id().to_owned()}
                on_back={on_back.clone()} />
        },
    };

    html! {
        <div class="app-container">
            <main class="content">
                { screen }
            </main>
            { render_tab_bar(navigator.tab(), &on_select_tab) }
        </div>
    }
}

fn render_home(
    session: &SessionController,
    engine: &Rc<RefCell<SwipeEngine>>,
    animating: &UseStateHandle<bool>,
    redraw: &UseForceUpdateHandle,
    on_swipe: &Callback<Direction>,
    on_open_detail: &Callback<RecordId>,
) -> Html {
    let body = match session.phase() {
        Phase::Loading => {
            return html! {
                <div class="screen centered">
                    <div class="spinner"></div>
                    <p class="loading-text">{ LOADING_MESSAGE }</p>
                </div>
            };
        }
        Phase::Terminal => html! {
            <div class="end-card">
                <div class="end-icon">{ "🎉" }</div>
                <div class="end-text">{ ALL_DONE_TITLE }</div>
                <div class="end-subtext">{ bids_placed_summary(session.bid_count()) }</div>
            </div>
        },
        Phase::Ready => match session.current() {
            Some(candidate) => {
                render_card(candidate, engine, animating, redraw, on_open_detail)
            }
            None => html! {},
        },
    };

    let action_buttons = if session.phase() == Phase::Ready {
        let swipe_button = |direction: Direction| {
            let engine = engine.clone();
            let on_swipe = on_swipe.clone();
            Callback::from(move |_: MouseEvent| {
                if !engine.borrow().is_busy() {
                    on_swipe.emit(direction);
                }
            })
        };
        html! {
            <div class="action-buttons">
                <button class="action-button pass" onclick={swipe_button(Direction::Left)}>{ "✕" }</button>
                <button class="action-button bid" onclick={swipe_button(Direction::Right)}>{ "💰" }</button>
            </div>
        }
    } else {
        html! {}
    };

    html! {
        <div class="screen home">
            <header class="header">
                <span class="logo">{ APP_TITLE }</span>
                <div class="bid-counter">
                    <span class="bid-count">{ session.bid_count().to_string() }</span>
                    <span class="bid-label">{ "Bids" }</span>
                </div>
            </header>
            <div class="card-container">
                { body }
            </div>
            { action_buttons }
        </div>
    }
}

fn render_card(
    candidate: &Candidate,
    engine: &Rc<RefCell<SwipeEngine>>,
    animating: &UseStateHandle<bool>,
    redraw: &UseForceUpdateHandle,
    on_open_detail: &Callback<RecordId>,
) -> Html {
    let style = {
        let engine = engine.borrow();
        CardStyle::new(
            engine.offset(),
            engine.rotation_deg(),
            engine.bid_badge_opacity(),
            engine.pass_badge_opacity(),
        )
    };

    let pointer_down = {
        let engine = engine.clone();
        let animating = animating.clone();
        let redraw = redraw.clone();
        Callback::from(move |event: PointerEvent| {
            event.prevent_default();
            let pressed = {
                let mut engine = engine.borrow_mut();
                engine.set_screen_width(screen_width());
                engine.press(
                    event.pointer_id(),
                    event.client_x() as f64,
                    event.client_y() as f64,
                )
            };
            if !pressed {
                return;
            }
            if let Some(target) = event
                .target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            {
                let _ = target.set_pointer_capture(event.pointer_id());
            }
            animating.set(false);
            redraw.force_update();
        })
    };

    let pointer_move = {
        let engine = engine.clone();
        let redraw = redraw.clone();
        Callback::from(move |event: PointerEvent| {
            let moved = engine.borrow_mut().drag(
                event.pointer_id(),
                event.client_x() as f64,
                event.client_y() as f64,
            );
            if moved.is_some() {
                event.prevent_default();
                redraw.force_update();
            }
        })
    };

    let pointer_end = {
        let engine = engine.clone();
        let animating = animating.clone();
        let on_open_detail = on_open_detail.clone();
        let candidate_id = candidate.id.clone();
        Callback::from(move |event: PointerEvent| {
            release_capture(&event);
            let released = engine.borrow_mut().release(event.pointer_id());
            let Some(release) = released else {
                return;
            };
            animating.set(true);
            if release.is_tap() {
                on_open_detail.emit(candidate_id.clone());
            }
        })
    };

    let pointer_cancel = {
        let engine = engine.clone();
        let animating = animating.clone();
        Callback::from(move |event: PointerEvent| {
            release_capture(&event);
            let interrupted = engine.borrow_mut().interrupt(event.pointer_id());
            if interrupted {
                animating.set(true);
            }
        })
    };

    html! {
        <div class="card swipe-enabled"
            style={style.card_css()}
            onpointerdown={pointer_down}
            onpointermove={pointer_move}
            onpointerup={pointer_end}
            onpointercancel={pointer_cancel}>
            <img class="card-image" src={candidate.image.clone()} draggable="false" />
            <div class="badge bid-badge" style={style.bid_badge_css()}>{ BID_BADGE_LABEL }</div>
            <div class="badge pass-badge" style={style.pass_badge_css()}>{ PASS_BADGE_LABEL }</div>
            <div class="card-info">
                <p class="card-name">{ name_and_age(&candidate.name, candidate.age) }</p>
                <p class="card-bio">{ &candidate.bio }</p>
                <div class="bid-container">
                    <span class="bid-label">{ "Starting Bid:" }</span>
                    <span class="bid-amount">{ format_amount(candidate.starting_bid) }</span>
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct CandidateDetailProps {
    id: RecordId,
    gateway: Rc<SupabaseGateway>,
    user_id: String,
    on_back: Callback<()>,
}

#[function_component(CandidateDetail)]
fn candidate_detail(props: &CandidateDetailProps) -> Html {
    let status = use_state(|| DetailStatus::Loading);

    {
        let status = status.clone();
        let gateway = props.gateway.clone();

        use_effect_with_deps(
            move |id: &RecordId| {
                status.set(DetailStatus::Loading);
                let id = id.clone();
                spawn_local(async move {
                    match gateway.get_candidate(&id).await {
                        Ok(candidate) => status.set(DetailStatus::Loaded(candidate)),
                        Err(err) => {
                            error!("Error loading person {id}: {err}");
                            status.set(DetailStatus::Unavailable);
                        }
                    }
                });

                || ()
            },
            props.id.clone(),
        );
    }

    let back_click = {
        let on_back = props.on_back.clone();
        Callback::from(move |_: MouseEvent| on_back.emit(()))
    };

    let candidate = match &*status {
        DetailStatus::Loading => {
            return html! { <div class="screen centered"><p>{ "Loading..." }</p></div> };
        }
        DetailStatus::Unavailable => {
            return html! {
                <div class="screen centered">
                    <p class="error">{ "This friend is unavailable." }</p>
                    <button class="back-link" onclick={back_click}>{ "Back" }</button>
                </div>
            };
        }
        DetailStatus::Loaded(candidate) => candidate.clone(),
    };

    let place_bid = {
        let gateway = props.gateway.clone();
        let on_back = props.on_back.clone();
        let user_id = props.user_id.clone();
        let candidate = candidate.clone();
        Callback::from(move |_: MouseEvent| {
            let gateway = gateway.clone();
            let on_back = on_back.clone();
            let bid = model::Bid::for_candidate(&candidate, &user_id);
            spawn_local(async move {
                match gateway.insert_bid(&bid).await {
                    Ok(()) => {
                        info!("Bid placed on {}", bid.candidate_id);
                        on_back.emit(());
                    }
                    Err(err) => error!("Error placing bid: {err}"),
                }
            });
        })
    };

    html! {
        <div class="screen detail">
            <div class="detail-image-container">
                <img class="detail-image" src={candidate.image.clone()} />
                <button class="back-button" onclick={back_click}>{ "←" }</button>
                <div class="detail-header-info">
                    <h1>{ name_and_age(&candidate.name, candidate.age) }</h1>
                    <p class="detail-location">{ DETAIL_LOCATION }</p>
                </div>
            </div>
            <div class="detail-content">
                <section class="detail-section">
                    <h2>{ format!("About {}", candidate.name) }</h2>
                    <p>{ &candidate.bio }</p>
                </section>
                <section class="detail-section">
                    <h2>{ "Starting Bid" }</h2>
                    <p class="bid-amount">{ format_amount(candidate.starting_bid) }</p>
                </section>
                <section class="detail-section">
                    <h2>{ "Occupation" }</h2>
                    <p>{ DETAIL_OCCUPATION }</p>
                </section>
                { render_bullets("Pros", DETAIL_PROS) }
                { render_bullets("Cons", DETAIL_CONS) }
                <section class="detail-section">
                    <h2>{ "Interests" }</h2>
                    <div class="tags">
                        { for DETAIL_INTERESTS.iter().map(|(icon, label)| html! {
                            <span class="tag">{ format!("{icon} {label}") }</span>
                        }) }
                    </div>
                </section>
                <section class="detail-section">
                    <h2>{ "Photo Gallery" }</h2>
                    <div class="gallery">
                        { for (0..GALLERY_SIZE).map(|_| html! {
                            <img class="gallery-image" src={candidate.image.clone()} />
                        }) }
                    </div>
                </section>
                <section class="detail-section">
                    <h2>{ "Testimonials" }</h2>
                    { for testimonials(&candidate.name).into_iter().map(|testimonial| html! {
                        <div class="testimonial">
                            <img class="testimonial-avatar" src={testimonial.avatar} />
                            <p class="testimonial-name">{ testimonial.author }</p>
                            <p class="testimonial-role">{ testimonial.role }</p>
                            <p class="testimonial-text">{ testimonial.quote }</p>
                        </div>
                    }) }
                </section>
            </div>
            <div class="bottom-bar">
                <button class="round-button" disabled=true>{ "⭐ Super Bid" }</button>
                <button class="round-button" disabled=true>{ "💬 Message" }</button>
                <button class="place-bid-button" onclick={place_bid}>{ "Place Bid" }</button>
            </div>
        </div>
    }
}

fn render_bullets(title: &str, items: &[&str]) -> Html {
    html! {
        <section class="detail-section">
            <h2>{ title.to_owned() }</h2>
            <ul class="bullets">
                { for items.iter().map(|item| html! { <li>{ item.to_string() }</li> }) }
            </ul>
        </section>
    }
}

fn render_profile() -> Html {
    html! {
        <div class="screen profile">
            <header class="header"><h1 class="title">{ "Profile" }</h1></header>
            <div class="placeholder">
                <div class="placeholder-icon">{ "👤" }</div>
                <p class="placeholder-text">{ PROFILE_PLACEHOLDER }</p>
            </div>
        </div>
    }
}

fn render_tab_bar(active: Tab, on_select_tab: &Callback<Tab>) -> Html {
    let tab_button = |tab: Tab, label: &'static str| {
        let on_select_tab = on_select_tab.clone();
        let class = if tab == active {
            "tab-button active"
        } else {
            "tab-button"
        };
        html! {
            <button {class} onclick={Callback::from(move |_| on_select_tab.emit(tab))}>{ label }</button>
        }
    };

    html! {
        <nav class="tab-bar">
            { tab_button(Tab::Home, "Home") }
            { tab_button(Tab::Profile, "Profile") }
        </nav>
    }
}

fn release_capture(event: &PointerEvent) {
    if let Some(target) = event
        .target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
    {
        let _ = target.release_pointer_capture(event.pointer_id());
    }
}

fn start_interval(tick: &Closure<dyn FnMut()>) -> Option<i32> {
    let window = window()?;
    window
        .set_interval_with_callback_and_timeout_and_arguments_0(
            tick.as_ref().unchecked_ref(),
            FRAME_MS as i32,
        )
        .map_err(|err| error!("Could not start animation timer: {err:?}"))
        .ok()
}

fn now_ms() -> Option<f64> {
    window()
        .and_then(|window| window.performance())
        .map(|performance| performance.now())
}

fn screen_width() -> f64 {
    window()
        .and_then(|window| window.inner_width().ok())
        .and_then(|width| width.as_f64())
        .unwrap_or(FALLBACK_SCREEN_WIDTH)
}

#[wasm_bindgen(start)]
pub fn run_app() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    info!("Friend Auction starting");
    yew::Renderer::<App>::new().render();
}
