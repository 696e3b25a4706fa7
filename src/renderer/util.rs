pub struct ImageRange {
    pub from: u32,
    pub to: u32,
}

/// Splits `height` rows into at most `num_thread` contiguous, non-empty ranges.
pub fn create_image_ranges(num_thread: u32, height: u32) -> Vec<ImageRange> {
    let num_thread = num_thread.clamp(1, height.max(1));
    let height_per_thread = height / num_thread;
    let mut ranges = Vec::with_capacity(num_thread as usize);
    for t in 0..num_thread {
        let from = t * height_per_thread;
        let to = if t + 1 == num_thread {
            height
        } else {
            (t + 1) * height_per_thread
        };
        if from < to {
            ranges.push(ImageRange { from, to });
        }
    }
    ranges
}

pub fn render_progress_bar(width: u32, height: u32) -> indicatif::ProgressBar {
    let progress_bar = indicatif::ProgressBar::new(width as u64 * height as u64);
    progress_bar.set_style(
        indicatif::ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} (eta: {eta})")
            .progress_chars("#>-"),
    );
    progress_bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_cover_every_row_once() {
        for (threads, height) in [(4, 10), (16, 3), (1, 7), (3, 3)] {
            let ranges = create_image_ranges(threads, height);
            assert!(ranges.len() as u32 <= threads);
            assert_eq!(ranges[0].from, 0);
            assert_eq!(ranges.last().unwrap().to, height);
            for pair in ranges.windows(2) {
                assert_eq!(pair[0].to, pair[1].from);
            }
            assert!(ranges.iter().all(|r| r.from < r.to));
        }
    }
}
