use std::fmt::Write;

use quintet_core::*;

/// Line to print for an event, `None` for events only a graphical front end cares about.
pub fn event_line(event: &Event) -> Option<String> {
    let line = match event {
        Event::Notice(notice) => {
            let tag = match notice.level {
                NoticeLevel::Success => "ok",
                NoticeLevel::Error => "!!",
                NoticeLevel::Info => "..",
            };
            format!("[{}] {}", tag, notice.message)
        }
        Event::PuzzleStarted { ordinal } => {
            let descriptor = PuzzleDescriptor::by_ordinal(*ordinal);
            format!(
                "== Puzzle {}/{}: {} ==",
                descriptor.ordinal, PUZZLE_COUNT, descriptor.label
            )
        }
        Event::PuzzleSolved { ordinal } => format!("Puzzle {} solved", ordinal),
        Event::GameCompleted { elapsed_secs } => {
            format!("All puzzles solved in {}", format_elapsed(*elapsed_secs))
        }
        Event::Playback(Some(token)) => format!("  * {}", token),
        Event::Reveal(true) => "Memorize the lit cells".to_string(),
        Event::InputOpened => "Your turn".to_string(),
        Event::RoundStarted
        | Event::Playback(None)
        | Event::Flash(_)
        | Event::Reveal(false) => return None,
    };
    Some(line)
}

/// One marker per puzzle, e.g. `[x] [>] [ ] [ ] [ ]`.
pub fn progress_line(progress: &[PuzzleProgress]) -> String {
    progress
        .iter()
        .map(|step| match step {
            PuzzleProgress::Done => "[x]",
            PuzzleProgress::Current => "[>]",
            PuzzleProgress::Pending => "[ ]",
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Plain text view of the puzzle being played.
pub fn puzzle_view(puzzle: &ActivePuzzle) -> String {
    match puzzle {
        ActivePuzzle::Sequence(puzzle) => sequence_view(puzzle),
        ActivePuzzle::NumberOrder(puzzle) => number_view(puzzle),
        ActivePuzzle::Recall(puzzle) => recall_view(puzzle),
        ActivePuzzle::SwapSort(puzzle) => sort_view(puzzle),
        ActivePuzzle::CodeBreaking(puzzle) => code_view(puzzle),
    }
}

fn sequence_view(puzzle: &SequencePuzzle) -> String {
    let pads = SequenceToken::ALL
        .iter()
        .map(|token| match puzzle.lit() {
            Some(lit) if lit == *token => format!("<{}>", token),
            _ => token.to_string(),
        })
        .collect::<Vec<_>>()
        .join("  ");
    format!(
        "pads: {}\nentered {}/{}",
        pads,
        puzzle.progress().len(),
        puzzle.target().len()
    )
}

fn number_view(puzzle: &NumberOrderPuzzle) -> String {
    let mut view = String::new();
    for row in puzzle.layout().chunks(3) {
        let cells = row
            .iter()
            .map(|&number| {
                if puzzle.is_clicked(number) {
                    " .".to_string()
                } else {
                    format!("{:>2}", number)
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(view, "{}", cells);
    }
    let _ = write!(view, "next: {}", puzzle.next_number());
    view
}

fn recall_view(puzzle: &RecallPuzzle) -> String {
    let board = puzzle.board();
    let side = board.ncols();
    board
        .rows()
        .into_iter()
        .enumerate()
        .map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(|(column, cell)| match cell {
                    RecallCell::Blank => format!("{:>2}", row * side + column + 1),
                    RecallCell::Lit => "##".to_string(),
                    RecallCell::Found => "ok".to_string(),
                    RecallCell::Missed => "xx".to_string(),
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn sort_view(puzzle: &SwapSortPuzzle) -> String {
    let row = puzzle
        .order()
        .iter()
        .enumerate()
        .map(|(slot, number)| {
            if puzzle.selected() == Some(slot as u8) {
                format!("[{}]", number)
            } else {
                format!(" {} ", number)
            }
        })
        .collect::<String>();
    format!("{}\nslots 1-{}, left to right", row, SORT_LEN)
}

fn code_view(puzzle: &CodeBreakingPuzzle) -> String {
    let mut view = String::new();
    for (i, record) in puzzle.history().iter().enumerate() {
        let _ = writeln!(
            view,
            "{:>2}. {} -> {}",
            i + 1,
            colors(&record.guess),
            record.score.feedback()
        );
    }
    let entered = colors(puzzle.current_guess());
    let missing = vec!["_"; CODE_LEN - puzzle.current_guess().len()].join(" ");
    let guess = [entered, missing]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let _ = write!(view, "guess: {}", guess);
    view
}

fn colors(colors: &[CodeColor]) -> String {
    colors
        .iter()
        .map(|color| color.name())
        .collect::<Vec<_>>()
        .join(" ")
}
