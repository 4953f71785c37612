use crate::domain::entities::query::{Page, PageState};

pub fn paginate<R: Clone>(rows: &[R], state: &PageState) -> Page<R> {
    let total_rows = rows.len();
    let total_pages = state.total_pages(total_rows);
    let current_page = state.current_page().clamp(1, total_pages);
    let start_index = ((current_page - 1) * state.page_size()).min(total_rows);
    let end_index = (start_index + state.page_size()).min(total_rows);

    Page {
        rows: rows[start_index..end_index].to_vec(),
        current_page,
        total_pages,
        start_index,
        end_index,
        total_rows,
    }
}
