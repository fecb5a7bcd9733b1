//! Console tables

use anyhow::Result;
use pairing_core::{
    homework_score, rating, round_exceptions, GroupSnapshot, Match, PlannedRound, PlayerId,
    Round, RoundProgress,
};

fn player_name(snapshot: &GroupSnapshot, id: PlayerId) -> String {
    snapshot
        .player(id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| format!("#{id}"))
}

pub fn print_pairings(snapshot: &GroupSnapshot, planned: &PlannedRound) {
    println!("\n=== Round {} Pairings ===", planned.round.id);
    println!(
        "Weights: win {:.2}, homework {:.2}",
        planned.round.win_weight, planned.round.homework_weight
    );
    println!(
        "{:<6} {:<24} {:>8}   {:<24} {:>8}",
        "Board", "First", "Rating", "Second", "Rating"
    );
    println!("{}", "-".repeat(76));
    for (board, m) in planned.matches.iter().enumerate() {
        let second = match m.second {
            Some(id) => player_name(snapshot, id),
            None => "BYE".to_string(),
        };
        println!(
            "{:<6} {:<24} {:>8}   {:<24} {:>8}",
            board + 1,
            player_name(snapshot, m.first),
            m.first_rating,
            second,
            m.second_rating.as_deref().unwrap_or("")
        );
    }
    println!();
}

/// Active players ordered by rating under the group's default weights
pub fn print_standings(snapshot: &GroupSnapshot) -> Result<()> {
    let weights = snapshot.defaults.round_config().validate()?.weights;

    let mut rows: Vec<_> = snapshot
        .players
        .iter()
        .filter(|p| p.active)
        .map(|p| (p, rating(&p.totals, weights)))
        .collect();
    rows.sort_by(|a, b| b.1.total_cmp(&a.1));

    println!("\n=== Standings ===");
    println!(
        "{:<4} {:<24} {:>4} {:>4} {:>4} {:>6} {:>8}",
        "#", "Player", "W", "L", "T", "HW %", "Rating"
    );
    println!("{}", "-".repeat(60));
    for (rank, (player, value)) in rows.iter().enumerate() {
        let t = &player.totals;
        println!(
            "{:<4} {:<24} {:>4} {:>4} {:>4} {:>6.1} {:>8.3}",
            rank + 1,
            player.name,
            t.wins,
            t.losses,
            t.ties,
            homework_score(t) * 100.0,
            value
        );
    }
    println!();
    Ok(())
}

pub fn print_progress(round: &Round, matches: &[Match]) {
    let progress = RoundProgress::measure(round, matches);
    println!("\n=== Round {} ({}) ===", round.id, round.status);
    println!(
        "Results:  {}/{}",
        progress.completed_results, progress.total_matches
    );
    println!(
        "Homework: {}/{}",
        progress.homework_done, progress.homework_total
    );
    if round.notation_required {
        println!(
            "Notation: {}/{}",
            progress.notation_done, progress.notation_total
        );
    }
    for exception in round_exceptions(round, matches) {
        println!("  ! {exception}");
    }
    println!();
}
