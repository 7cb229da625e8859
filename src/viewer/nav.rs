use crate::error::{AppError, AppResult};

pub const MIN_SCALE: f32 = 0.5;
pub const MAX_SCALE: f32 = 2.0;
pub const DEFAULT_SCALE: f32 = 1.0;
pub const DEFAULT_ZOOM_STEP: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageView {
    /// 1-based.
    pub current_page: usize,
    pub scale: f32,
    pub total_pages: usize,
}

impl PageView {
    pub fn zoom_percent(&self) -> u32 {
        (self.scale * 100.0).round() as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    Changed,
    Unchanged,
}

impl NavOutcome {
    pub fn changed(self) -> bool {
        self == Self::Changed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ViewState {
    #[default]
    NoDocument,
    Ready(PageView),
}

impl ViewState {
    pub fn current(&self) -> Option<PageView> {
        match self {
            Self::NoDocument => None,
            Self::Ready(view) => Some(*view),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn load_document(&mut self, total_pages: usize) -> AppResult<()> {
        if total_pages == 0 {
            return Err(AppError::decode("document has no pages"));
        }
        *self = Self::Ready(PageView {
            current_page: 1,
            scale: DEFAULT_SCALE,
            total_pages,
        });
        Ok(())
    }

    pub fn next_page(&mut self) -> NavOutcome {
        self.step_page(1)
    }

    pub fn prev_page(&mut self) -> NavOutcome {
        self.step_page(-1)
    }

    pub fn first_page(&mut self) -> NavOutcome {
        self.goto_page(1)
    }

    pub fn last_page(&mut self) -> NavOutcome {
        match self.current() {
            Some(view) => self.goto_page(view.total_pages),
            None => NavOutcome::Unchanged,
        }
    }

    /// Targets outside `1..=total_pages` leave the state untouched.
    pub fn goto_page(&mut self, page: usize) -> NavOutcome {
        let Self::Ready(view) = self else {
            return NavOutcome::Unchanged;
        };
        if page < 1 || page > view.total_pages || page == view.current_page {
            return NavOutcome::Unchanged;
        }
        view.current_page = page;
        NavOutcome::Changed
    }

    pub fn zoom_in(&mut self, step: f32) -> NavOutcome {
        self.adjust_scale(step)
    }

    pub fn zoom_out(&mut self, step: f32) -> NavOutcome {
        self.adjust_scale(-step)
    }

    pub fn reset_zoom(&mut self) -> NavOutcome {
        self.set_scale(DEFAULT_SCALE)
    }

    fn step_page(&mut self, delta: isize) -> NavOutcome {
        let Some(view) = self.current() else {
            return NavOutcome::Unchanged;
        };
        match view.current_page.checked_add_signed(delta) {
            Some(target) => self.goto_page(target),
            None => NavOutcome::Unchanged,
        }
    }

    fn adjust_scale(&mut self, delta: f32) -> NavOutcome {
        let Some(view) = self.current() else {
            return NavOutcome::Unchanged;
        };
        if !delta.is_finite() {
            return NavOutcome::Unchanged;
        }
        self.set_scale(view.scale + delta)
    }

    fn set_scale(&mut self, scale: f32) -> NavOutcome {
        let Self::Ready(view) = self else {
            return NavOutcome::Unchanged;
        };
        let next = clamp_scale(scale);
        if view.scale == next {
            return NavOutcome::Unchanged;
        }
        view.scale = next;
        NavOutcome::Changed
    }
}

pub fn clamp_scale(scale: f32) -> f32 {
    if !scale.is_finite() {
        return DEFAULT_SCALE;
    }
    scale.clamp(MIN_SCALE, MAX_SCALE)
}

#[cfg(test)]
fn scale_eq(left: f32, right: f32) -> bool {
    (left - right).abs() <= 0.0005
}
