#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rust_xlsxwriter::{Format, Workbook};
use std::env;
use std::fs;
use std::path::PathBuf;

pub const SHEET: &str = "Расписание";

pub fn sch() -> Command {
    cargo_bin_cmd!("schedics")
}

/// Create a temporary file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_schedics.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Minimal valid configuration, plus any extra YAML lines
pub fn write_config(name: &str, extra: &str) -> String {
    let path = temp_out(name, "yml");
    let yaml = format!("public_link: \"https://disk.yandex.ru/i/test\"\nyear: 2025\n{extra}");
    fs::write(&path, yaml).expect("write config");
    path
}

pub fn write_fixture(name: &str, bytes: &[u8]) -> String {
    let path = temp_out(name, "xlsx");
    fs::write(&path, bytes).expect("write xlsx");
    path
}

/// Classic layout, 1-based cells:
///
/// ```text
///      A             B                    C
/// 1                  понедельник          среда
/// 3                  <date 2025-09-01>    "3.9"
/// 5    9:00-10:30    Химия (B5:B6)        Математика / ауд. 101
/// 6    10:40-12:10                        Экзамен / Физика
/// ```
pub fn classic_workbook() -> Vec<u8> {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("dd.mm.yyyy");
    let plain = Format::new();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET).unwrap();
    sheet.write_string(0, 1, "понедельник").unwrap();
    sheet.write_string(0, 2, "среда").unwrap();
    // 45901 = 2025-09-01
    sheet
        .write_number_with_format(2, 1, 45901.0, &date_format)
        .unwrap();
    sheet.write_string(2, 2, "3.9").unwrap();
    sheet.write_string(4, 0, "9:00-10:30").unwrap();
    sheet.write_string(5, 0, "10:40-12:10").unwrap();
    sheet.merge_range(4, 1, 5, 1, "Химия", &plain).unwrap();
    sheet.write_string(4, 2, "Математика\nауд. 101").unwrap();
    sheet.write_string(5, 2, "Экзамен\nФизика").unwrap();

    workbook.save_to_buffer().unwrap()
}

/// Row-wise layout: Monday spans B:C with per-column time headers, dates in A.
///
/// ```text
///      A        B                      C
/// 1             понедельник (B1:C1)
/// 2             9:00-10:30             14:00
/// 3    01.09    Математика             Физика
/// 4    08.09    Экзамен / Математика
/// ```
pub fn rowwise_workbook() -> Vec<u8> {
    let mut workbook = Workbook::new();
    let plain = Format::new();

    let sheet = workbook.add_worksheet();
    sheet.merge_range(0, 1, 0, 2, "понедельник", &plain).unwrap();
    sheet.write_string(1, 1, "9:00-10:30").unwrap();
    sheet.write_string(1, 2, "14:00").unwrap();
    sheet.write_string(2, 0, "01.09").unwrap();
    sheet.write_string(2, 1, "Математика").unwrap();
    sheet.write_string(2, 2, "Физика").unwrap();
    sheet.write_string(3, 0, "08.09").unwrap();
    sheet.write_string(3, 1, "Экзамен\nМатематика").unwrap();

    workbook.save_to_buffer().unwrap()
}

/// Row-wise sheet whose only time header is a native `hh:mm` cell.
///
/// ```text
///      A        B
/// 1             понедельник
/// 2             <time 14:00>
/// 3    01.09    Математика
/// ```
pub fn native_time_workbook() -> Vec<u8> {
    let mut workbook = Workbook::new();
    let time_format = Format::new().set_num_format("hh:mm");

    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 1, "понедельник").unwrap();
    sheet
        .write_number_with_format(1, 1, 14.0 / 24.0, &time_format)
        .unwrap();
    sheet.write_string(2, 0, "01.09").unwrap();
    sheet.write_string(2, 1, "Математика").unwrap();

    workbook.save_to_buffer().unwrap()
}
