use instant::{Duration, Instant};
use yew::prelude::*;
use crate::GIT_VERSION;
use crate::web::{KeyEvent, KeyListener, WordleKey};
use crate::wordle::{
    Action, Cell, DATA, Hints, letter_idx, N_WORD_HINTS, NUM_TURNS, Outcome, Session, SessionErr,
    SOLVER_UNLOCK_CLICKS, WordSource,
};

const KEYBOARD_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

pub struct App {
    _key_listener: Option<KeyListener>,

    /// None while the word set selection screen is showing
    session: Option<Session>,
    hints: Option<ComputedHints>,
    panel: Option<HintPanel>,
    latest_err: Option<String>,
    title_clicks: usize,
}

#[derive(Debug)]
struct ComputedHints {
    hints: Hints<'static>,
    took: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintPanel {
    Words,
    Letters,
}

#[derive(Debug)]
pub enum Msg {
    Key(KeyEvent),
    Play(WordSource),
    Press(char),
    Backspace,
    Enter,
    CycleStatus { row: usize, col: usize },
    TogglePanel(HintPanel),
    GiveUp,
    NewGame,
    Reset,
    TitleClick,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let key_listener = KeyListener::create(ctx.link().callback(Msg::Key));
        if key_listener.is_none() {
            log::warn!("no keyboard input, only the on-screen keyboard will work");
        }

        Self {
            _key_listener: key_listener,
            session: None,
            hints: None,
            panel: None,
            latest_err: None,
            title_clicks: 0,
        }
    }

    fn update(&mut self, _: &Context<Self>, msg: Self::Message) -> bool {
        log::debug!("app msg {:?}", &msg);
        use Msg::*;
        match msg {
            Key(event) => self.handle_key(event),
            Play(source) => self.start_game(source),
            Press(c) => self.apply(Action::Type(c)),
            Backspace => self.apply(Action::Backspace),
            Enter => self.apply(Action::Submit),
            CycleStatus { row, col } => {
                if self.is_solver() {
                    self.apply(Action::CycleStatus { row, col })
                } else {
                    false
                }
            }
            TogglePanel(panel) => {
                self.panel = if self.panel == Some(panel) { None } else { Some(panel) };
                true
            }
            GiveUp => self.apply(Action::GiveUp),
            NewGame => self.new_game(),
            Reset => {
                self.session = None;
                self.hints = None;
                self.panel = None;
                self.latest_err = None;
                self.title_clicks = 0;
                true
            }
            TitleClick => self.click_title(),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="body">
                <div class="center">
                    {self.show_title_html(ctx)}
                    {
                        match &self.session {
                            Some(session) => self.show_session(ctx, session),
                            None => Self::show_word_sets(ctx),
                        }
                    }
                    {self.show_error()}
                </div>
                {self.show_hints(ctx)}
                <div class="footer">{format!("build {}", GIT_VERSION)}</div>
            </div>
        }
    }
}

impl App {
    fn is_solver(&self) -> bool {
        self.session.as_ref().map(|s| s.is_solver()).unwrap_or(false)
    }

    fn handle_key(&mut self, mut event: KeyEvent) -> bool {
        let key = match event.wordle_key() {
            Some(key) => key,
            None => return false,
        };

        let playing = self.session.as_ref().map(|s| !s.is_done()).unwrap_or(false);
        if !playing {
            return false;
        }

        event.prevent_default();
        match key {
            WordleKey::Letter(c) => self.apply(Action::Type(c)),
            WordleKey::Backspace => self.apply(Action::Backspace),
            WordleKey::Enter if self.is_solver() => false,
            WordleKey::Enter => self.apply(Action::Submit),
        }
    }

    /// Runs an action through the session, keeping the old session (and showing the error) if
    /// it was rejected
    fn apply(&mut self, action: Action) -> bool {
        let result = match &self.session {
            Some(session) => session.reduce(&DATA, action),
            None => return false,
        };

        match result {
            Ok(next) => {
                self.latest_err = None;
                self.set_session(next);
            }
            Err(err) => self.latest_err = Some(err.to_string()),
        }

        true
    }

    fn set_session(&mut self, session: Session) {
        let start = Instant::now();
        let hints = session.hints(&DATA);
        let took = start.elapsed();
        log::debug!(
            "{} candidates left, hints took {:.02}ms",
            hints.candidates.len(),
            took.as_secs_f64() * 1000.0,
        );
        self.hints = Some(ComputedHints { hints, took });
        self.session = Some(session);
    }

    fn start_game(&mut self, source: WordSource) -> bool {
        match Session::random_game(source, &DATA, &mut rand::thread_rng()) {
            Ok(session) => {
                self.latest_err = None;
                self.set_session(session);
            }
            Err(err) => self.latest_err = Some(err.to_string()),
        }

        true
    }

    fn new_game(&mut self) -> bool {
        let source = match &self.session {
            Some(session) => session.source(),
            None => return false,
        };

        if self.is_solver() {
            self.set_session(Session::new_solver(source));
            return true;
        }

        match DATA.random_secret(source, &mut rand::thread_rng()) {
            Some(secret) => self.apply(Action::NewGame { secret: secret.to_string() }),
            None => {
                self.latest_err = Some(SessionErr::NoWordsAvailable(source).to_string());
                true
            }
        }
    }

    fn click_title(&mut self) -> bool {
        if self.is_solver() {
            return false;
        }

        self.title_clicks += 1;
        if self.title_clicks < SOLVER_UNLOCK_CLICKS {
            return false;
        }

        let source = self.session.as_ref().map(|s| s.source()).unwrap_or_default();
        log::info!("solver mode unlocked ({} word set)", source);
        self.title_clicks = 0;
        self.latest_err = None;
        self.set_session(Session::new_solver(source));
        true
    }

    fn show_title_html(&self, ctx: &Context<Self>) -> Html {
        let title = if self.is_solver() { "Wordle Hints (solver)" } else { "Wordle Hints" };
        html! {
            <div class="title" onclick={ctx.link().callback(|_| Msg::TitleClick)}>
                {title}
            </div>
        }
    }

    fn show_word_sets(ctx: &Context<Self>) -> Html {
        html! {
            <div class="word-sets">
                <div class="prompt">{"Pick a word set to play with"}</div>
                {
                    WordSource::ALL.iter().copied().map(|source| html! {
                        <div class="word-set button" onclick={ctx.link().callback(move |_| Msg::Play(source))}>
                            <span class="label">{source.label()}</span>
                            <span class="count">{format!("{} words", DATA.secrets(source).len())}</span>
                        </div>
                    }).collect::<Html>()
                }
            </div>
        }
    }

    fn show_session(&self, ctx: &Context<Self>, session: &Session) -> Html {
        html! {
            <>
                {Self::show_grid(ctx, session)}
                {Self::show_outcome(session)}
                {Self::show_keyboard(ctx, session)}
                {Self::show_buttons(ctx, session)}
            </>
        }
    }

    fn show_grid(ctx: &Context<Self>, session: &Session) -> Html {
        html! {
            <div class="game">
                {
                    session.grid().iter().enumerate().map(|(row, cells)| html! {
                        <div class="game-row">
                            {
                                cells.iter().enumerate()
                                    .map(|(col, cell)| Self::show_cell(ctx, session, row, col, cell))
                                    .collect::<Html>()
                            }
                        </div>
                    }).collect::<Html>()
                }
            </div>
        }
    }

    fn show_cell(ctx: &Context<Self>, session: &Session, row: usize, col: usize, cell: &Cell) -> Html {
        let active = !session.is_done() && session.cursor() == (row, col);
        html! {
            <div class={classes!(
                    "game-cell",
                    if active { "active" } else { "inactive" },
                    cell.letter.map(|_| "filled").unwrap_or("empty"),
                    cell.status.map(|s| s.css_class()).unwrap_or("s-none"))}
                onclick={ctx.link().callback(move |_| Msg::CycleStatus { row, col })}
            >
                { cell.letter.unwrap_or(' ') }
            </div>
        }
    }

    fn show_outcome(session: &Session) -> Html {
        let text = match (session.outcome(), session.secret()) {
            (Some(Outcome::Won { turns }), _) => format!("Solved in {}/{}!", turns, NUM_TURNS),
            (Some(Outcome::Lost), Some(secret)) => format!("The word was {}", secret),
            _ => return html! { <></> },
        };

        html! {
            <div class="outcome">{text}</div>
        }
    }

    fn show_keyboard(ctx: &Context<Self>, session: &Session) -> Html {
        let statuses = session.key_statuses();
        let key_class = |c: char| statuses[letter_idx(c as u8)]
            .map(|s| s.css_class())
            .unwrap_or("s-none");

        html! {
            <div class="keyboard">
                {
                    KEYBOARD_ROWS.iter().enumerate().map(|(idx, keys)| html! {
                        <div class="keyboard-row">
                            {
                                if idx + 1 == KEYBOARD_ROWS.len() && !session.is_solver() {
                                    html! {
                                        <div class="key wide" onclick={ctx.link().callback(|_| Msg::Enter)}>{"ENTER"}</div>
                                    }
                                } else {
                                    html! { <></> }
                                }
                            }
                            {
                                keys.chars().map(|c| html! {
                                    <div class={classes!("key", key_class(c))}
                                        onclick={ctx.link().callback(move |_| Msg::Press(c))}>
                                        {c}
                                    </div>
                                }).collect::<Html>()
                            }
                            {
                                if idx + 1 == KEYBOARD_ROWS.len() {
                                    html! {
                                        <div class="key wide" onclick={ctx.link().callback(|_| Msg::Backspace)}>{"⌫"}</div>
                                    }
                                } else {
                                    html! { <></> }
                                }
                            }
                        </div>
                    }).collect::<Html>()
                }
            </div>
        }
    }

    fn show_buttons(ctx: &Context<Self>, session: &Session) -> Html {
        let give_up = if session.is_solver() || session.is_done() {
            html! { <></> }
        } else {
            html! {
                <div class="give-up-button button" onclick={ctx.link().callback(|_| Msg::GiveUp)}>{"Give up"}</div>
            }
        };
        let new_game_label = if session.is_solver() { "Clear" } else { "New game" };

        html! {
            <div class="buttons">
                {give_up}
                <div class="new-game-button button" onclick={ctx.link().callback(|_| Msg::NewGame)}>{new_game_label}</div>
                <div class="reset-button button" onclick={ctx.link().callback(|_| Msg::Reset)}>{"Change word set"}</div>
            </div>
        }
    }

    fn show_error(&self) -> Html {
        match &self.latest_err {
            Some(err) => html! { <div class="error">{err}</div> },
            None => html! { <></> },
        }
    }

    fn show_hints(&self, ctx: &Context<Self>) -> Html {
        let computed = match (&self.session, &self.hints) {
            (Some(_), Some(computed)) => computed,
            _ => return html! { <></> },
        };

        let tab = |panel: HintPanel, label: &'static str| html! {
            <div class={classes!("tab", "button", if self.panel == Some(panel) { "open" } else { "closed" })}
                onclick={ctx.link().callback(move |_| Msg::TogglePanel(panel))}>
                {label}
            </div>
        };

        html! {
            <div class="suggestions">
                <div class="tabs">
                    {tab(HintPanel::Words, "Possible words")}
                    {tab(HintPanel::Letters, "Most common letters")}
                </div>
                {
                    match self.panel {
                        Some(HintPanel::Words) => Self::show_word_hints(&computed.hints),
                        Some(HintPanel::Letters) => Self::show_letter_hints(&computed.hints),
                        None => html! { <></> },
                    }
                }
                <div class="load-time">{format!("computed in {:.02}ms", computed.took.as_secs_f64() * 1000.0)}</div>
            </div>
        }
    }

    fn show_word_hints(hints: &Hints<'_>) -> Html {
        let more = hints.candidates.len() > N_WORD_HINTS;
        html! {
            <div class="list words">
                <div class="count">{format!("{} possible", hints.candidates.len())}</div>
                {
                    hints.candidates.iter().take(N_WORD_HINTS).map(|word| html! {
                        <div class="item">{*word}</div>
                    }).collect::<Html>()
                }
                {
                    if more {
                        html! { <div class="item more">{"..."}</div> }
                    } else {
                        html! { <></> }
                    }
                }
            </div>
        }
    }

    fn show_letter_hints(hints: &Hints<'_>) -> Html {
        html! {
            <div class="list letters">
                {
                    hints.letters.iter().enumerate().map(|(idx, (letter, count))| html! {
                        <div class="item">
                            <div class="ordinal">{format!("#{:02}", idx + 1)}</div>
                            <div class="letter">{*letter}</div>
                            <div class="details">{count}</div>
                        </div>
                    }).collect::<Html>()
                }
            </div>
        }
    }
}
