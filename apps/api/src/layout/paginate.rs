//! Splits a rendered resume into printed pages.
//!
//! Each block is wrapped into physical lines with the template's font
//! metrics, then pages are filled greedily. A heading is never left as the
//! last thing on a page. A block taller than a whole page is split across
//! pages at line boundaries.

use serde::Serialize;

use crate::layout::font_metrics::{get_metrics, FontFamily, PageConfig};
use crate::render::{block_text_lines, Block, RenderedResume};

/// One block after wrapping.
#[derive(Debug, Clone, PartialEq)]
pub struct LaidBlock {
    pub block_index: usize,
    pub lines: Vec<String>,
    pub keep_with_next: bool,
}

/// The lines of one block that landed on one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageFragment {
    /// Index into `RenderedResume::blocks`.
    pub block_index: usize,
    pub lines: Vec<String>,
    /// False when the block was split and other lines of it sit on another page.
    pub whole: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    pub fragments: Vec<PageFragment>,
}

impl Page {
    pub fn lines(&self) -> Vec<&str> {
        self.fragments
            .iter()
            .flat_map(|f| f.lines.iter().map(String::as_str))
            .collect()
    }

    pub fn line_count(&self) -> usize {
        self.fragments.iter().map(|f| f.lines.len()).sum()
    }

    /// Blocks with at least one line on this page, in order.
    pub fn block_indices(&self) -> Vec<usize> {
        self.fragments.iter().map(|f| f.block_index).collect()
    }

    fn push(&mut self, block_index: usize, lines: &[String], whole: bool) {
        self.fragments.push(PageFragment {
            block_index,
            lines: lines.to_vec(),
            whole,
        });
    }

    fn remaining(&self, config: &PageConfig) -> usize {
        usize::from(config.lines_per_page).saturating_sub(self.line_count())
    }
}

/// How full the final page is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageFillSummary {
    pub page_count: usize,
    pub last_page_lines: usize,
    pub lines_per_page: u16,
    pub last_page_fill: f32,
}

pub fn fill_summary(pages: &[Page], config: &PageConfig) -> PageFillSummary {
    let last_page_lines = pages.last().map_or(0, Page::line_count);
    PageFillSummary {
        page_count: pages.len(),
        last_page_lines,
        lines_per_page: config.lines_per_page,
        last_page_fill: last_page_lines as f32 / f32::from(config.lines_per_page.max(1)),
    }
}

/// Wraps every block of `rendered` at the page's text width.
pub fn lay_out(rendered: &RenderedResume, config: &PageConfig) -> Vec<LaidBlock> {
    let metrics = get_metrics(config.font);
    rendered
        .blocks
        .iter()
        .enumerate()
        .filter(|(_, block)| **block != Block::ColumnBreak)
        .map(|(block_index, block)| LaidBlock {
            block_index,
            lines: block_text_lines(block)
                .iter()
                .flat_map(|line| metrics.wrap(line, config.text_width_em))
                .collect(),
            keep_with_next: block.keeps_with_next(),
        })
        .collect()
}

/// Fills pages from laid-out blocks. Always returns at least one page.
pub fn paginate(blocks: &[LaidBlock], config: &PageConfig) -> Vec<Page> {
    let per_page = usize::from(config.lines_per_page.max(1));
    let mut pages = vec![Page::default()];

    let mut i = 0;
    while i < blocks.len() {
        // A run of keep-with-next blocks travels with the whole block after
        // it when both fit on one page, otherwise with its first line.
        let mut run_end = i;
        while run_end < blocks.len() && blocks[run_end].keep_with_next {
            run_end += 1;
        }
        let run_lines: usize = blocks[i..run_end].iter().map(|b| b.lines.len()).sum();
        let next_lines = blocks.get(run_end).map_or(0, |b| b.lines.len());
        let group_fits = run_lines + next_lines <= per_page;
        let needed = if group_fits {
            run_lines + next_lines
        } else {
            run_lines + next_lines.min(1)
        };

        let current = pages.last().map_or(0, Page::line_count);
        if run_end > i && needed <= per_page && needed > per_page - current.min(per_page) {
            pages.push(Page::default());
        }

        for block in &blocks[i..run_end] {
            place(&mut pages, block, config, true);
        }
        if let Some(block) = blocks.get(run_end) {
            // After a heading the block may only move as a unit if the
            // heading moved with it.
            place(&mut pages, block, config, run_end == i || group_fits);
        }
        i = run_end + 1;
    }
    pages
}

fn place(pages: &mut Vec<Page>, block: &LaidBlock, config: &PageConfig, keep_whole: bool) {
    let per_page = usize::from(config.lines_per_page.max(1));
    let total = block.lines.len();
    let mut rest: &[String] = &block.lines;

    // Keep a block whole when it fits on a fresh page.
    if let Some(page) = pages.last() {
        if keep_whole && total > page.remaining(config) && total <= per_page && page.line_count() > 0 {
            pages.push(Page::default());
        }
    }

    while !rest.is_empty() {
        let Some(page) = pages.last_mut() else {
            return;
        };
        let room = page.remaining(config);
        if room == 0 {
            pages.push(Page::default());
            continue;
        }
        let take = room.min(rest.len());
        page.push(block.block_index, &rest[..take], take == total);
        rest = &rest[take..];
    }
}

/// Lays out and paginates `rendered` on A4 in the template's typeface.
pub fn paginate_resume(rendered: &RenderedResume) -> (Vec<Page>, PageConfig) {
    let config = crate::layout::a4_page_config(FontFamily::for_template(rendered.template));
    let laid = lay_out(rendered, &config);
    (paginate(&laid, &config), config)
}
