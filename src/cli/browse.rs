use super::ready_menu;
use crate::error::Result;
use crate::report_view::ReportMenuView;
use crate::settings::load_settings;
use crate::tui::run_report_view;

pub fn run(area: Option<String>) -> Result<()> {
    let settings = load_settings();
    let mut menu = ready_menu(&settings);

    if let Some(ref name) = area {
        menu.select_area_by_name(name)?;
    }

    let mut view = ReportMenuView::new(menu);
    run_report_view(&mut view)
}
