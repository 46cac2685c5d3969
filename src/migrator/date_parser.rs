// ==========================================
// BOL 数据迁移引擎 - 弹性日期解析器
// ==========================================
// 职责: 多格式脏日期文本 → 规范时间戳（或 None）
// 约束: 固定优先级顺序，首个命中即返回；美式斜杠日期优先于欧式
// 约束: 回退提取路径命中时必须留日志，不允许静默掩盖数据质量问题
// ==========================================

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;
use tracing::warn;

/// 结构化格式表（按优先级排序，首个命中即返回）
///
/// 顺序约定:
/// 1. ISO 变体（含时间）
/// 2. 美式 MM/DD/YYYY 变体（含 AM/PM）
/// 3. 欧式 DD/MM/YYYY（低优先级回退，只有美式解析不了才会轮到）
/// 4. 紧凑 YYYYMMDD 与英文长月名
const DATE_FORMATS: &[(&str, bool)] = &[
    // ISO
    ("%Y-%m-%d", false),
    ("%Y/%m/%d", false),
    ("%Y-%m-%d %H:%M:%S", true),
    ("%Y/%m/%d %H:%M:%S", true),
    // 美式 (MM/DD/YYYY)
    ("%m/%d/%Y", false),
    ("%m-%d-%Y", false),
    ("%m/%d/%Y %H:%M:%S", true),
    ("%m/%d/%Y %I:%M:%S %p", true),
    ("%m/%d/%Y %I:%M %p", true),
    // 欧式 (DD/MM/YYYY)
    ("%d/%m/%Y", false),
    ("%d-%m-%Y", false),
    // 其他常见格式
    ("%Y%m%d", false),
    ("%B %d, %Y", false),
];

fn iso_embedded_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\d{4}[-/]\d{1,2}[-/]\d{1,2})").expect("valid embedded iso date regex")
    })
}

fn us_embedded_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\d{1,2}[-/]\d{1,2}[-/]\d{4})").expect("valid embedded us date regex")
    })
}

/// 解析脏数据中常见的多种日期格式
///
/// 先按固定优先级尝试结构化格式；全部失败后，再尝试从较脏文本
/// （尾随时间戳、批注等）中提取形如 ISO 或美式的日期片段重新解析。
///
/// 返回 None 表示"无日期"，是合法终态而非错误；调用方据此决定跳过发运。
pub fn parse_flexible_date(raw: Option<&str>) -> Option<NaiveDateTime> {
    let date_str = raw?.trim();
    if date_str.is_empty() {
        return None;
    }

    // === 第一级: 结构化格式表 ===
    for (fmt, has_time) in DATE_FORMATS {
        if *has_time {
            if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, fmt) {
                return Some(dt);
            }
        } else if let Ok(d) = NaiveDate::parse_from_str(date_str, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    // === 第二级: 回退提取（嵌入片段） ===
    if let Some(caps) = iso_embedded_re().captures(date_str) {
        let candidate = caps[1].replace('/', "-");
        if let Ok(d) = NaiveDate::parse_from_str(&candidate, "%Y-%m-%d") {
            warn!(
                raw = %date_str,
                extracted = %candidate,
                "日期结构化解析失败，回退提取 ISO 片段成功"
            );
            return d.and_hms_opt(0, 0, 0);
        }
    }

    if let Some(caps) = us_embedded_re().captures(date_str) {
        let candidate = caps[1].replace('-', "/");
        if let Ok(d) = NaiveDate::parse_from_str(&candidate, "%m/%d/%Y") {
            warn!(
                raw = %date_str,
                extracted = %candidate,
                "日期结构化解析失败，回退提取美式片段成功"
            );
            return d.and_hms_opt(0, 0, 0);
        }
    }

    warn!(raw = %date_str, "无法解析日期");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_iso_formats() {
        assert_eq!(parse_flexible_date(Some("2026-01-09")), Some(ymd(2026, 1, 9)));
        assert_eq!(parse_flexible_date(Some("2026/03/15")), Some(ymd(2026, 3, 15)));
        assert_eq!(
            parse_flexible_date(Some("2026-03-15 14:30:00")),
            NaiveDate::from_ymd_opt(2026, 3, 15).unwrap().and_hms_opt(14, 30, 0)
        );
    }

    #[test]
    fn test_us_priority_over_european() {
        // 01/09/2026 必须解析为 1 月 9 日（美式优先），而不是 9 月 1 日
        assert_eq!(parse_flexible_date(Some("01/09/2026")), Some(ymd(2026, 1, 9)));
        assert_eq!(parse_flexible_date(Some("03/15/2026")), Some(ymd(2026, 3, 15)));
    }

    #[test]
    fn test_european_fallback_when_us_impossible() {
        // 月份位 25 使美式解析失败，轮到欧式 DD/MM/YYYY
        assert_eq!(parse_flexible_date(Some("25/12/2026")), Some(ymd(2026, 12, 25)));
    }

    #[test]
    fn test_us_with_ampm() {
        assert_eq!(
            parse_flexible_date(Some("03/15/2026 02:30 PM")),
            NaiveDate::from_ymd_opt(2026, 3, 15).unwrap().and_hms_opt(14, 30, 0)
        );
        assert_eq!(
            parse_flexible_date(Some("03/15/2026 02:30:45 AM")),
            NaiveDate::from_ymd_opt(2026, 3, 15).unwrap().and_hms_opt(2, 30, 45)
        );
    }

    #[test]
    fn test_compact_and_long_form() {
        assert_eq!(parse_flexible_date(Some("20260109")), Some(ymd(2026, 1, 9)));
        assert_eq!(
            parse_flexible_date(Some("January 15, 2026")),
            Some(ymd(2026, 1, 15))
        );
    }

    #[test]
    fn test_fallback_extraction_from_noisy_text() {
        // 尾随批注使结构化解析失败，回退提取应命中
        assert_eq!(
            parse_flexible_date(Some("2026-01-09 (confirmed by carrier)")),
            Some(ymd(2026, 1, 9))
        );
        assert_eq!(
            parse_flexible_date(Some("shipped 03/15/2026 late pm")),
            Some(ymd(2026, 3, 15))
        );
    }

    #[test]
    fn test_unparseable_returns_none() {
        assert_eq!(parse_flexible_date(Some("garbage")), None);
        assert_eq!(parse_flexible_date(Some("")), None);
        assert_eq!(parse_flexible_date(Some("   ")), None);
        assert_eq!(parse_flexible_date(None), None);
    }
}
