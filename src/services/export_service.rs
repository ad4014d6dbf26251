use crate::error::Result;
use crate::models::application::{ApplicationRow, ApplicationStatus};
use rust_xlsxwriter::*;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub struct ExportService;

const BORDER: Color = Color::RGB(0xE2E8F0); // Slate 200

fn cell(background: Color) -> Format {
    Format::new()
        .set_font_size(10)
        .set_background_color(background)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin)
        .set_border_color(BORDER)
}

impl ExportService {
    /// Generate a styled XLSX workbook from application rows, in the order given.
    pub fn generate_applications_xlsx(rows: &[ApplicationRow]) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Applications")?;

        let primary_color = Color::RGB(0x1E293B); // Slate 800
        let header_bg = Color::RGB(0x0F172A); // Slate 900
        let header_text = Color::White;
        let alt_row_1 = Color::RGB(0xF8FAFC); // Slate 50
        let alt_row_2 = Color::White;

        let columns = [
            ("#", 6.0),
            ("Applicant", 28.0),
            ("Email", 30.0),
            ("Phone", 16.0),
            ("Internship", 30.0),
            ("Status", 20.0),
            ("Applied", 18.0),
            ("Interview", 22.0),
            ("Interview instructions", 40.0),
            ("Admin comments", 40.0),
        ];
        let last_col = (columns.len() - 1) as u16;

        for (i, (_, width)) in columns.iter().enumerate() {
            worksheet.set_column_width(i as u16, *width)?;
        }

        let title_format = Format::new()
            .set_font_size(16)
            .set_bold()
            .set_font_color(header_text)
            .set_background_color(primary_color)
            .set_align(FormatAlign::CenterAcross)
            .set_align(FormatAlign::VerticalCenter);
        worksheet.set_row_height(0, 36)?;
        worksheet.merge_range(0, 0, 0, last_col, "Internship applications", &title_format)?;

        let subtitle_format = Format::new()
            .set_font_size(10)
            .set_italic()
            .set_font_color(Color::RGB(0x94A3B8))
            .set_background_color(primary_color)
            .set_align(FormatAlign::CenterAcross)
            .set_align(FormatAlign::VerticalCenter);
        worksheet.set_row_height(1, 22)?;
        let now = chrono::Utc::now().format("%d.%m.%Y %H:%M UTC").to_string();
        let subtitle = format!("Exported {}  •  {} applications", now, rows.len());
        worksheet.merge_range(1, 0, 1, last_col, &subtitle, &subtitle_format)?;

        let header_format = cell(header_bg)
            .set_bold()
            .set_font_color(header_text)
            .set_align(FormatAlign::Center)
            .set_text_wrap();
        let header_row = 2;
        worksheet.set_row_height(header_row, 28)?;
        for (i, (name, _)) in columns.iter().enumerate() {
            worksheet.write_string_with_format(header_row, i as u16, *name, &header_format)?;
        }

        let data_start_row = 3;
        for (idx, item) in rows.iter().enumerate() {
            let app = &item.application;
            let row = data_start_row + idx as u32;
            let bg = if idx % 2 == 0 { alt_row_1 } else { alt_row_2 };

            let base_fmt = cell(bg);
            let center_fmt = base_fmt.clone().set_align(FormatAlign::Center);
            let wrap_fmt = base_fmt.clone().set_text_wrap();

            worksheet.set_row_height(row, 22)?;
            worksheet.write_number_with_format(row, 0, (idx + 1) as f64, &center_fmt)?;
            worksheet.write_string_with_format(row, 1, &app.full_name, &base_fmt.clone().set_bold())?;
            worksheet.write_string_with_format(row, 2, &app.email, &base_fmt)?;
            worksheet.write_string_with_format(row, 3, app.phone.as_deref().unwrap_or("—"), &base_fmt)?;

            let internship = item
                .internship_title
                .clone()
                .unwrap_or_else(|| format!("(id:{})", app.internship_id));
            worksheet.write_string_with_format(row, 4, &internship, &wrap_fmt)?;

            let status_fmt = cell(Color::RGB(app.status.badge_rgb()))
                .set_bold()
                .set_font_color(Color::White)
                .set_align(FormatAlign::Center);
            worksheet.write_string_with_format(row, 5, app.status.label(), &status_fmt)?;

            let applied = app.applied_at.format("%d.%m.%Y %H:%M").to_string();
            worksheet.write_string_with_format(row, 6, &applied, &center_fmt)?;

            let (interview, instructions) = match &app.interview_details {
                Some(details) => (
                    format!("{} {}", details.date.format("%d.%m.%Y"), details.time),
                    details.instructions.as_str(),
                ),
                None => ("—".to_string(), "—"),
            };
            worksheet.write_string_with_format(row, 7, &interview, &center_fmt)?;
            worksheet.write_string_with_format(row, 8, instructions, &wrap_fmt)?;
            worksheet.write_string_with_format(
                row,
                9,
                app.admin_comments.as_deref().unwrap_or("—"),
                &wrap_fmt,
            )?;
        }

        let total_row = data_start_row + rows.len() as u32 + 1;
        let summary_fmt = cell(Color::RGB(0xE0E7FF)) // Indigo 100
            .set_bold()
            .set_font_color(primary_color)
            .set_align(FormatAlign::Center);
        worksheet.set_row_height(total_row, 26)?;
        worksheet.merge_range(
            total_row,
            0,
            total_row,
            1,
            &format!("Total: {}", rows.len()),
            &summary_fmt,
        )?;

        let status_summary = ApplicationStatus::ALL
            .into_iter()
            .map(|status| {
                let count = rows
                    .iter()
                    .filter(|r| r.application.status == status)
                    .count();
                format!("{}: {}", status.label(), count)
            })
            .collect::<Vec<_>>()
            .join(" | ");
        worksheet.merge_range(total_row, 2, total_row, last_col, &status_summary, &summary_fmt)?;

        worksheet.set_freeze_panes(3, 0)?;
        worksheet.autofilter(
            2,
            0,
            (data_start_row + rows.len() as u32).saturating_sub(1).max(2),
            last_col,
        )?;

        let buffer = workbook.save_to_buffer()?;
        Ok(buffer)
    }
}
