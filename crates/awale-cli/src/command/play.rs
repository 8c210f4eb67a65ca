use awale_engine::{Bot, Game, GameEnd, Player, Side};

use crate::registry;

use super::config_arg::TrainingConfigArg;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Bot sitting on the south side
    #[arg(long, default_value = "network")]
    south: String,
    /// Bot sitting on the north side
    #[arg(long, default_value = "random")]
    north: String,
    /// Print the board after every move
    #[arg(long)]
    verbose: bool,
    #[clap(flatten)]
    config: TrainingConfigArg,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let context = arg.config.to_context()?;
    let mut bots = [
        registry::create(&arg.south, &context)?,
        registry::create(&arg.north, &context)?,
    ];
    for bot in &mut bots {
        bot.learn();
        bot.initialize();
    }

    let mut wins = [0_u32; 2];
    for opener in Side::ALL {
        let mut game = Game::with_move_limit(opener, arg.config.move_limit());
        if arg.verbose {
            eprintln!("{opener} opens:\n{}", game.board());
        }
        let outcome = loop {
            let mover = game.board().current_player();
            let player: &mut dyn Player = &mut bots[mover.index()];
            let end = game.step(player);
            if arg.verbose && !matches!(end, Some(GameEnd::Forfeit(_))) {
                eprintln!("move {} by {mover}:\n{}", game.moves(), game.board());
            }
            if let Some(outcome) = game.outcome() {
                break outcome;
            }
        };

        eprintln!(
            "{} (south) {} - {} {} (north) after {} moves: {}",
            bots[0].identity(),
            outcome.scores[0],
            outcome.scores[1],
            bots[1].identity(),
            outcome.moves,
            describe_end(outcome.end, &bots),
        );
        if let Some(winner) = outcome.winner() {
            wins[winner.index()] += 1;
        }
    }
    eprintln!("Games won: south {} / north {}", wins[0], wins[1]);
    Ok(())
}

fn describe_end(end: GameEnd, bots: &[Box<dyn Bot>; 2]) -> String {
    match end {
        GameEnd::Forfeit(side) => format!("{} forfeits", bots[side.index()].identity()),
        GameEnd::ScoreReached => "winning score reached".to_owned(),
        GameEnd::BoardExhausted => "board exhausted".to_owned(),
        GameEnd::MoveLimit => "move limit reached".to_owned(),
    }
}
