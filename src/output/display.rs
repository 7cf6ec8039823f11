//! Display functions for command results

use super::formatters::{colored_tiles, create_progress_bar, format_score, word_preview};
use crate::commands::{BenchmarkResult, ScoreResult, SolveResult, SuggestResult};
use crate::constraints::HardModeVerdict;
use crate::solver::{Suggestion, SuggestionKind};
use colored::Colorize;

fn header(title: &str) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", title.bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());
}

fn kind_label(kind: SuggestionKind) -> colored::ColoredString {
    match kind {
        SuggestionKind::Candidate => "candidate".green(),
        SuggestionKind::Probe => "probe".magenta(),
    }
}

fn suggestion_line(rank: usize, suggestion: &Suggestion, recommended: bool) -> String {
    let word = suggestion.word.text().to_uppercase();
    let word = if recommended {
        word.bright_yellow().bold()
    } else {
        word.normal()
    };
    let expected = suggestion
        .expected_remaining
        .map_or_else(String::new, |e| format!("  E[left] {e:6.2}"));
    format!(
        "{rank:>3}. {word}  {:<9}  score {}{expected}",
        kind_label(suggestion.kind),
        format_score(suggestion.score)
    )
}

/// Print the remaining candidates and ranked suggestions
pub fn print_suggest_result(result: &SuggestResult, show: usize) {
    header("SUGGESTIONS");

    println!(
        "\n{} {}",
        "Candidates left:".bright_cyan(),
        result.candidates.len().to_string().bright_yellow().bold()
    );
    if !result.candidates.is_empty() {
        println!("   {}", word_preview(&result.candidates, 20));
    }

    let rec = &result.recommendation;
    let Some(recommended) = &rec.recommended else {
        println!("\n{}", "No guess to recommend".red().bold());
        return;
    };

    println!(
        "\n{} {} ({})",
        "Recommended:".bright_cyan().bold(),
        recommended.word.text().to_uppercase().bright_yellow().bold(),
        kind_label(recommended.kind)
    );
    let method = if rec.exact {
        "exact expected-remaining"
    } else {
        "letter coverage heuristic"
    };
    println!("   Ranked by {}", method.dimmed());

    println!();
    for (i, suggestion) in rec.ordered().iter().take(show).enumerate() {
        let is_recommended = suggestion.word == recommended.word;
        println!("{}", suggestion_line(i + 1, suggestion, is_recommended));
    }
}

/// Print a scored candidate list
pub fn print_score_result(result: &ScoreResult) {
    header(&format!("SCORES: {}", result.mode));
    println!("   {} candidates scored\n", result.candidate_count);

    for (i, row) in result.rows.iter().enumerate() {
        println!(
            "{:>4}. {}  {}",
            i + 1,
            row.word.text().to_uppercase(),
            format_score(row.score).bright_yellow()
        );
    }
}

/// Print a hard-mode verdict
pub fn print_check_result(guess: &str, verdict: &HardModeVerdict) {
    if verdict.ok {
        println!(
            "{} {}",
            guess.to_uppercase().bold(),
            "is allowed in hard mode".green()
        );
        return;
    }
    println!(
        "{} {}",
        guess.to_uppercase().bold(),
        "breaks hard mode:".red().bold()
    );
    for reason in &verdict.reasons {
        println!("   - {reason}");
    }
}

/// Print the result of solving a word
pub fn print_solve_result(result: &SolveResult, verbose: bool) {
    println!("\n{}", "─".repeat(60).cyan());
    println!(
        "Solving: {}",
        result.target.text().to_uppercase().bright_yellow().bold()
    );
    println!("{}", "─".repeat(60).cyan());

    for (i, step) in result.guesses.iter().enumerate() {
        println!(
            "\nTurn {}: {}  {}",
            i + 1,
            colored_tiles(&step.word, step.pattern),
            kind_label(step.kind)
        );

        if verbose {
            println!(
                "  Candidates: {} → {}",
                step.candidates_before, step.candidates_after
            );
            if let Some(expected) = step.expected_remaining {
                println!("  Expected:   {expected:.2} candidates");
            }
            if step.candidates_after > 0 {
                let ratio = step.candidates_before as f64 / step.candidates_after as f64;
                println!("  Info gained: {:.3} bits ({ratio:.1}x reduction)", ratio.log2());
            }
        }
    }

    println!();
    if result.success {
        println!(
            "{}",
            format!("Solved in {} guesses", result.guesses.len())
                .green()
                .bold()
        );
    } else {
        println!(
            "{}",
            format!("Not solved after {} guesses", result.guesses.len())
                .red()
                .bold()
        );
    }
}

/// Print the result of a benchmark
pub fn print_benchmark_result(result: &BenchmarkResult) {
    header("BENCHMARK RESULTS");

    println!("\n{}", "Performance:".bright_cyan().bold());
    println!("   Words tested:     {}", result.total_words);
    println!("   Solved:           {}", result.solved.to_string().green());
    println!(
        "   Average guesses:  {}",
        format!("{:.3}", result.average_guesses)
            .bright_yellow()
            .bold()
    );
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());
    println!("   Words/second:     {:.1}", result.words_per_second);

    if result.total_words == 0 {
        return;
    }

    println!("\n{}", "Distribution:".bright_cyan().bold());
    let mut counts: Vec<(usize, usize)> = result.distribution.iter().map(|(&g, &c)| (g, c)).collect();
    counts.sort_unstable();
    for (guesses, count) in counts {
        let pct = count as f64 / result.total_words as f64 * 100.0;
        let bar = create_progress_bar(pct, 100.0, 40);
        println!("   {guesses}: {} {count:5} ({pct:5.1}%)", bar.green());
    }

    if !result.failures.is_empty() {
        println!(
            "\n{} {}",
            "Failures:".red().bold(),
            word_preview(&result.failures, 30)
        );
    }
}
