/// Cursor over the filtered list. The list itself lives in the view model, so
/// every method takes the current visible length instead of caching rows.
#[derive(Debug, Default)]
pub(crate) struct ListScreen {
    pub(crate) selected: usize,
}

impl ListScreen {
    pub(crate) fn move_selection(&mut self, offset: isize, len: usize) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        let last = len as isize - 1;
        let new = (self.selected as isize + offset).clamp(0, last);
        self.selected = new as usize;
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self, len: usize) {
        self.selected = len.saturating_sub(1);
    }

    /// Pull the cursor back inside the list after rows disappear.
    pub(crate) fn ensure_in_bounds(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_is_clamped_to_the_list() {
        let mut screen = ListScreen::default();
        screen.move_selection(-3, 4);
        assert_eq!(screen.selected, 0);

        screen.move_selection(10, 4);
        assert_eq!(screen.selected, 3);

        screen.ensure_in_bounds(2);
        assert_eq!(screen.selected, 1);

        screen.move_selection(1, 0);
        assert_eq!(screen.selected, 0);

        screen.select_last(5);
        assert_eq!(screen.selected, 4);
        screen.select_first();
        assert_eq!(screen.selected, 0);
    }
}
