use crate::utils::*;
use clap::Args;
use gloo::timers::callback::Timeout;
use pexeso_core as game;
use game::LayoutGenerator;
use yew::html::Scope;
use yew::prelude::*;

const IMAGE_PATH_PREFIX: &str = "images/tile-";

fn image_src(image_id: game::PairId) -> String {
    format!("{}{:02}.svg", IMAGE_PATH_PREFIX, image_id)
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    #[prop_or_default]
    seed: Option<u64>,

    /// Number of board rows
    #[arg(long)]
    #[prop_or_default]
    rows: Option<game::Coord>,

    /// Number of board columns
    #[arg(long)]
    #[prop_or_default]
    cols: Option<game::Coord>,

    /// How long a mismatched pair stays face-up, in milliseconds
    #[arg(long)]
    #[prop_or_default]
    delay_ms: Option<u32>,
}

impl GameProps {
    /// Board configuration from the props, falling back to the defaults when the board can't be split into pairs.
    fn config(&self) -> game::GameConfig {
        let defaults = game::GameConfig::default();
        let rows = self.rows.unwrap_or(defaults.rows);
        let cols = self.cols.unwrap_or(defaults.cols);
        let config = game::GameConfig::new(rows, cols).unwrap_or_else(|err| {
            log::warn!("{}, using a {}x{} board", err, defaults.rows, defaults.cols);
            defaults
        });
        config.with_mismatch_delay_ms(self.delay_ms.unwrap_or(defaults.mismatch_delay_ms))
    }
}

/// Runs the mismatch reset through a browser timeout; dropping the [`Timeout`] clears it.
pub(crate) struct TimeoutScheduler {
    link: Scope<GameView>,
}

impl game::Scheduler for TimeoutScheduler {
    type Task = Timeout;

    fn schedule(&mut self, delay_ms: u32) -> Self::Task {
        let link = self.link.clone();
        log::trace!("mismatch reset in {}ms", delay_ms);
        Timeout::new(delay_ms, move || link.send_message(Msg::MismatchTimeout))
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Pick(game::Coord2),
    MismatchTimeout,
    PlayAgain,
}

#[derive(Properties, Clone, PartialEq)]
struct TileProps {
    row: game::Coord,
    col: game::Coord,
    view: game::CellView,
    callback: Callback<game::Coord2>,
}

#[function_component(TileView)]
fn tile_component(props: &TileProps) -> Html {
    let TileProps {
        row,
        col,
        view,
        callback,
    } = props.clone();

    let class = classes!(
        "tile",
        view.can_flip.then_some("clickable"),
        view.is_flipped.then_some("flipped")
    );

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("({}, {}) click", row, col);
        if view.can_flip {
            callback.emit((row, col));
        }
    });

    html! {
        <td {class} {onclick}>
            if view.is_flipped {
                <img src={image_src(view.image_id)} alt={format!("image_{}", view.image_id)}/>
            }
        </td>
    }
}

#[derive(Debug)]
pub(crate) struct GameView {
    config: game::GameConfig,
    seed: u64,
    session: game::MatchSession<TimeoutScheduler>,
    scoreboard: game::Scoreboard,
}

impl GameView {
    fn new_session(
        ctx: &Context<Self>,
        config: game::GameConfig,
        seed: u64,
    ) -> game::MatchSession<TimeoutScheduler> {
        let layout = game::RandomLayoutGenerator::new(seed)
            .generate(config)
            .expect("config is validated by GameProps");
        let scheduler = TimeoutScheduler {
            link: ctx.link().clone(),
        };
        game::MatchSession::new(
            game::MatchEngine::new(layout),
            config.mismatch_delay_ms,
            scheduler,
        )
    }

    fn is_over(&self) -> bool {
        self.scoreboard.winner().is_some()
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let config = ctx.props().config();
        let seed = ctx.props().seed.unwrap_or_else(js_random_seed);
        Self {
            config,
            seed,
            session: Self::new_session(ctx, config, seed),
            scoreboard: game::Scoreboard::new(game::Team::random(js_random_seed())),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Pick(coords) => {
                if self.is_over() {
                    return false;
                }
                let outcome = self.session.pick(coords, &mut self.scoreboard);
                log::debug!("pick {:?}: {:?}", coords, outcome);
                outcome.has_update()
            }
            MismatchTimeout => {
                let outcome = self.session.fire_pending(&mut self.scoreboard);
                log::debug!("mismatch timeout: {:?}", outcome);
                outcome.has_update()
            }
            PlayAgain => {
                self.seed = js_random_seed();
                log::debug!("new game, seed: {}", self.seed);
                // replacing the session drops any pending timeout with it
                self.session = Self::new_session(ctx, self.config, self.seed);
                self.scoreboard.reset(game::Team::random(js_random_seed()));
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let engine = self.session.engine();
        let (rows, cols) = engine.size();
        let status = self.scoreboard.status_line();
        let score = self.scoreboard.score_line();
        let team_class = classes!(
            "header",
            (!self.is_over()).then(|| self.scoreboard.current().name().to_lowercase())
        );

        let board = if self.is_over() {
            let onclick = ctx.link().callback(|_: MouseEvent| Msg::PlayAgain);
            html! {
                <button class="play-again" {onclick}>{"Play Again"}</button>
            }
        } else {
            html! {
                <table class={(!engine.is_input_enabled()).then_some("locked")}>
                    {
                        for (0..rows).map(|row| html! {
                            <tr>
                                {
                                    for (0..cols).map(|col| {
                                        let view = engine.view_at((row, col));
                                        let callback = ctx.link().callback(Msg::Pick);
                                        html! {
                                            <TileView {row} {col} {view} {callback}/>
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
            }
        };

        html! {
            <div class="pexeso">
                <nav class={team_class}>
                    <div>{status}</div>
                    <div>{score}</div>
                </nav>
                {board}
            </div>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        if self.session.cancel_pending() {
            log::debug!("game view destroyed with a pending mismatch reset");
        }
    }
}
