/// Unicode block characters used for sparkline rendering, from lowest to highest.
const BLOCKS: [char; 8] = [
    '\u{2581}', '\u{2582}', '\u{2583}', '\u{2584}', '\u{2585}', '\u{2586}', '\u{2587}', '\u{2588}',
];

/// Renders `data` as a filled area chart `height` rows tall and `width`
/// columns wide, returned top row first.
///
/// Only the last `width` points are shown; shorter data is right-aligned.
/// Each column is scaled against the maximum of the visible window with
/// eighth-block resolution. Zero renders as blank.
pub fn sparkline_rows(data: &[u64], width: usize, height: usize) -> Vec<String> {
    if width == 0 || height == 0 {
        return vec![String::new(); height];
    }

    let visible: &[u64] = if data.len() > width {
        &data[data.len() - width..]
    } else {
        data
    };
    let max_val = visible.iter().copied().max().unwrap_or(0);
    let padding = width.saturating_sub(visible.len());
    let levels = (height * 8) as f64;

    let eighths: Vec<usize> = visible
        .iter()
        .map(|&v| {
            if max_val == 0 {
                0
            } else {
                ((v as f64 / max_val as f64) * levels).round() as usize
            }
        })
        .collect();

    (0..height)
        .rev()
        .map(|row| {
            let mut line = String::with_capacity(width * 3);
            line.extend(std::iter::repeat_n(' ', padding));
            for &e in &eighths {
                let fill = e.saturating_sub(row * 8).min(8);
                line.push(if fill == 0 { ' ' } else { BLOCKS[fill - 1] });
            }
            line
        })
        .collect()
}
