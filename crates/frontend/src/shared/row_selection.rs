//! Выделение строк таблицы: обычный клик, флажок и Ctrl+клик
//!
//! `selected_rows` хранит выделенные строки без повторов в порядке таблицы;
//! `selected_by_checkbox` только те, что отмечены флажком или Ctrl+кликом.
//! `last_index` это позиция последней затронутой строки (0, если ничего
//! не выделено).

#[derive(Debug, Clone, PartialEq)]
pub struct RowSelection<K> {
    selected_rows: Vec<K>,
    selected_by_checkbox: Vec<K>,
    last_index: usize,
}

impl<K> Default for RowSelection<K> {
    fn default() -> Self {
        Self {
            selected_rows: Vec::new(),
            selected_by_checkbox: Vec::new(),
            last_index: 0,
        }
    }
}

impl<K: Clone + PartialEq> RowSelection<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_rows(&self) -> &[K] {
        &self.selected_rows
    }

    pub fn selected_by_checkbox(&self) -> &[K] {
        &self.selected_by_checkbox
    }

    pub fn last_index(&self) -> usize {
        self.last_index
    }

    pub fn is_selected(&self, row: &K) -> bool {
        self.selected_rows.contains(row)
    }

    pub fn is_checked(&self, row: &K) -> bool {
        self.selected_by_checkbox.contains(row)
    }

    pub fn clear(&mut self) {
        self.selected_rows.clear();
        self.selected_by_checkbox.clear();
        self.last_index = 0;
    }

    /// Обычный клик: повторный клик по единственной выделенной строке
    /// снимает выделение, иначе выделенной остаётся только она.
    pub fn click(&mut self, rows: &[K], row: &K) {
        let only_this = self.selected_rows.len() == 1 && self.selected_rows[0] == *row;
        self.selected_rows.clear();
        if !only_this {
            self.selected_rows.push(row.clone());
        }
        self.selected_by_checkbox.clear();
        self.update_last_index(rows, row);
    }

    /// Клик по флажку строки, остальные строки не затрагиваются
    pub fn checkbox_click(&mut self, rows: &[K], row: &K) {
        if self.is_checked(row) {
            self.remove(row);
        } else {
            self.add(rows, row);
        }
        self.update_last_index(rows, row);
    }

    /// Ctrl+клик: переключает строку так же, как флажок, но решение
    /// принимается по общему выделению
    pub fn ctrl_click(&mut self, rows: &[K], row: &K) {
        if self.is_selected(row) {
            self.remove(row);
        } else {
            self.add(rows, row);
        }
        self.update_last_index(rows, row);
    }

    /// Оставляет только строки, которые ещё есть в таблице
    pub fn retain_existing(&mut self, rows: &[K]) {
        self.selected_rows.retain(|r| rows.contains(r));
        self.selected_by_checkbox.retain(|r| rows.contains(r));
        if self.selected_rows.is_empty() {
            self.last_index = 0;
        }
    }

    fn remove(&mut self, row: &K) {
        self.selected_rows.retain(|r| r != row);
        self.selected_by_checkbox.retain(|r| r != row);
    }

    fn add(&mut self, rows: &[K], row: &K) {
        insert_in_table_order(&mut self.selected_rows, rows, row);
        insert_in_table_order(&mut self.selected_by_checkbox, rows, row);
    }

    fn update_last_index(&mut self, rows: &[K], row: &K) {
        self.last_index = if self.selected_rows.is_empty() {
            0
        } else {
            position(rows, row).unwrap_or(0)
        };
    }
}

fn position<K: PartialEq>(rows: &[K], row: &K) -> Option<usize> {
    rows.iter().position(|r| r == row)
}

fn insert_in_table_order<K: Clone + PartialEq>(target: &mut Vec<K>, rows: &[K], row: &K) {
    if target.contains(row) {
        return;
    }
    let order = position(rows, row).unwrap_or(usize::MAX);
    let at = target
        .iter()
        .position(|r| position(rows, r).unwrap_or(usize::MAX) > order)
        .unwrap_or(target.len());
    target.insert(at, row.clone());
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROWS: [&str; 5] = ["a", "b", "c", "d", "e"];

    #[test]
    fn test_click_on_single_selected_row_clears() {
        let mut s = RowSelection::new();
        s.click(&ROWS, &"c");
        assert_eq!(s.selected_rows(), &["c"]);
        assert_eq!(s.last_index(), 2);

        s.click(&ROWS, &"c");
        assert!(s.selected_rows().is_empty());
        assert_eq!(s.last_index(), 0);
    }

    #[test]
    fn test_click_replaces_selection() {
        let mut s = RowSelection::new();
        s.click(&ROWS, &"a");
        s.click(&ROWS, &"d");
        assert_eq!(s.selected_rows(), &["d"]);
        assert_eq!(s.last_index(), 3);
    }

    #[test]
    fn test_click_inside_multi_selection_keeps_only_that_row() {
        let mut s = RowSelection::new();
        s.checkbox_click(&ROWS, &"a");
        s.checkbox_click(&ROWS, &"b");
        s.click(&ROWS, &"b");
        assert_eq!(s.selected_rows(), &["b"]);
        assert!(s.selected_by_checkbox().is_empty());
    }

    #[test]
    fn test_checkbox_twice_restores_previous_state() {
        let mut s = RowSelection::new();
        s.checkbox_click(&ROWS, &"b");
        s.checkbox_click(&ROWS, &"d");
        let before = s.selected_rows().to_vec();

        s.checkbox_click(&ROWS, &"c");
        assert_eq!(s.selected_rows(), &["b", "c", "d"]);
        s.checkbox_click(&ROWS, &"c");
        assert_eq!(s.selected_rows(), before.as_slice());
        assert_eq!(s.selected_by_checkbox(), &["b", "d"]);
    }

    #[test]
    fn test_checkbox_keeps_table_order_without_duplicates() {
        let mut s = RowSelection::new();
        s.click(&ROWS, &"c");
        s.checkbox_click(&ROWS, &"e");
        s.checkbox_click(&ROWS, &"a");
        assert_eq!(s.selected_rows(), &["a", "c", "e"]);
        assert_eq!(s.selected_by_checkbox(), &["a", "e"]);

        s.checkbox_click(&ROWS, &"c");
        assert_eq!(s.selected_rows(), &["a", "c", "e"]);
        assert_eq!(s.selected_by_checkbox(), &["a", "c", "e"]);
    }

    #[test]
    fn test_ctrl_click_toggles_and_tracks_last_index() {
        let mut s = RowSelection::new();
        s.click(&ROWS, &"a");
        s.ctrl_click(&ROWS, &"d");
        assert_eq!(s.selected_rows(), &["a", "d"]);
        assert_eq!(s.last_index(), 3);

        s.ctrl_click(&ROWS, &"a");
        assert_eq!(s.selected_rows(), &["d"]);
        assert_eq!(s.last_index(), 0);

        s.ctrl_click(&ROWS, &"d");
        assert!(s.selected_rows().is_empty());
        assert_eq!(s.last_index(), 0);
    }

    #[test]
    fn test_retain_existing_drops_deleted_rows() {
        let mut s = RowSelection::new();
        s.checkbox_click(&ROWS, &"b");
        s.checkbox_click(&ROWS, &"c");
        s.retain_existing(&["a", "c"]);
        assert_eq!(s.selected_rows(), &["c"]);
        assert_eq!(s.selected_by_checkbox(), &["c"]);
    }
}
