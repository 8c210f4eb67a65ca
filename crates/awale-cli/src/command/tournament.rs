use std::{cmp::Ordering, path::PathBuf, time::Instant};

use awale_engine::{Bot, Match, MatchOutcome};
use chrono::Utc;

use crate::{
    model::summary::{Standing, TournamentSummary},
    registry,
    util::Output,
};

use super::config_arg::TrainingConfigArg;

const WIN_POINTS: u32 = 3;
const DRAW_POINTS: u32 = 1;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TournamentArg {
    /// Registered bots to rank (all of them when omitted)
    #[arg(long = "bot")]
    bots: Vec<String>,
    /// Matches played by every pair of bots
    #[arg(long, default_value_t = 1)]
    runs: usize,
    /// Write the standings as JSON to this file
    #[arg(long)]
    output: Option<PathBuf>,
    #[clap(flatten)]
    config: TrainingConfigArg,
}

/// Win/draw/loss tally of one bot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Record {
    wins: u32,
    draws: u32,
    losses: u32,
}

impl Record {
    fn points(self) -> u32 {
        WIN_POINTS * self.wins + DRAW_POINTS * self.draws
    }
}

/// Records a match: the contestant winning more games wins the match.
fn record_match(records: [&mut Record; 2], outcome: &MatchOutcome) {
    let [a, b] = records;
    let [a_wins, b_wins] = outcome.game_wins();
    match a_wins.cmp(&b_wins) {
        Ordering::Greater => {
            a.wins += 1;
            b.losses += 1;
        }
        Ordering::Less => {
            a.losses += 1;
            b.wins += 1;
        }
        Ordering::Equal => {
            a.draws += 1;
            b.draws += 1;
        }
    }
}

/// Sorts by descending points; equal points share a rank.
fn standings(names: &[String], records: &[Record]) -> Vec<Standing> {
    let mut order = (0..names.len()).collect::<Vec<_>>();
    order.sort_by_key(|&i| std::cmp::Reverse(records[i].points()));

    let mut standings = Vec::<Standing>::with_capacity(order.len());
    for (position, i) in order.into_iter().enumerate() {
        let record = records[i];
        let rank = match standings.last() {
            Some(previous) if previous.points == record.points() => previous.rank,
            _ => position + 1,
        };
        standings.push(Standing {
            rank,
            bot: names[i].clone(),
            points: record.points(),
            wins: record.wins,
            draws: record.draws,
            losses: record.losses,
        });
    }
    standings
}

pub(crate) fn run(arg: &TournamentArg) -> anyhow::Result<()> {
    let names = if arg.bots.is_empty() {
        registry::names().map(str::to_owned).collect()
    } else {
        arg.bots.clone()
    };
    anyhow::ensure!(names.len() >= 2, "A tournament needs at least two bots");

    let context = arg.config.to_context()?;
    let mut bots = names
        .iter()
        .map(|name| registry::create(name, &context))
        .collect::<anyhow::Result<Vec<Box<dyn Bot>>>>()?;

    for bot in &mut bots {
        let start = Instant::now();
        bot.learn();
        eprintln!("{}: learned in {:.2?}", bot.identity(), start.elapsed());
    }

    let game_match = Match::new(arg.config.move_limit());
    let mut records = vec![Record::default(); bots.len()];
    for i in 0..bots.len() {
        let (head, tail) = bots.split_at_mut(i + 1);
        let first = &mut head[i];
        for (offset, second) in tail.iter_mut().enumerate() {
            let j = i + 1 + offset;
            for run in 0..arg.runs {
                first.initialize();
                second.initialize();
                let outcome = game_match.play([&mut *first, &mut *second]);
                let (head, tail) = records.split_at_mut(j);
                record_match([&mut head[i], &mut tail[0]], &outcome);
                log::debug!(
                    "run {run}: {} vs {}: {:?} games in {:.2?}",
                    first.identity(),
                    second.identity(),
                    outcome.game_wins(),
                    outcome.duration
                );
            }
        }
    }

    let standings = standings(&names, &records);
    eprintln!("Standings after {} run(s):", arg.runs);
    for standing in &standings {
        eprintln!(
            "  {:2}. {:<10} {:3} pts ({}W {}D {}L)",
            standing.rank,
            standing.bot,
            standing.points,
            standing.wins,
            standing.draws,
            standing.losses
        );
    }

    if let Some(path) = &arg.output {
        let summary = TournamentSummary {
            played_at: Utc::now(),
            runs: arg.runs,
            standings,
        };
        Output::save_json(&summary, Some(path.as_path()))?;
        eprintln!("Standings saved to {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use awale_engine::{GameEnd, GameOutcome, Side};

    use super::*;

    fn outcome(scores: [[u32; 2]; 2]) -> MatchOutcome {
        MatchOutcome {
            games: scores.map(|scores| GameOutcome {
                first_player: Side::South,
                scores,
                moves: 40,
                end: GameEnd::BoardExhausted,
            }),
            duration: Duration::ZERO,
        }
    }

    #[test]
    fn test_match_scores_three_one_zero() {
        let mut a = Record::default();
        let mut b = Record::default();
        record_match([&mut a, &mut b], &outcome([[25, 3], [20, 20]]));
        record_match([&mut a, &mut b], &outcome([[25, 3], [3, 25]]));
        assert_eq!(a.points(), 4);
        assert_eq!(b.points(), 1);
        assert_eq!(b.losses, 1);
    }

    #[test]
    fn test_equal_points_share_rank() {
        let names = ["a", "b", "c"].map(str::to_owned);
        let records = [
            Record {
                wins: 0,
                draws: 1,
                losses: 1,
            },
            Record {
                wins: 1,
                draws: 1,
                losses: 0,
            },
            Record {
                wins: 0,
                draws: 1,
                losses: 1,
            },
        ];
        let standings = standings(&names, &records);
        let ranks = standings
            .iter()
            .map(|s| (s.bot.as_str(), s.rank, s.points))
            .collect::<Vec<_>>();
        assert_eq!(ranks, [("b", 1, 4), ("a", 2, 1), ("c", 2, 1)]);
    }
}
