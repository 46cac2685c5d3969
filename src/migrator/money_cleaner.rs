// ==========================================
// BOL 数据迁移引擎 - 金额清洗器
// ==========================================
// 职责: 货币格式文本 → 非负整数数量
// 约束: 任何解析失败一律归零，绝不向调用方抛错
// ==========================================

/// 清洗货币格式字符串并截断为非负整数
///
/// 支持 "$1,200"、"1,500.00" 等形式；去掉货币符号、千分位与首尾空白后
/// 按十进制数解析并向零截断。
///
/// 归零情形: None / 空串 / 非数值文本 / 负数 / 非有限值 / 超出 i64 范围。
pub fn clean_money_to_int(raw: Option<&str>) -> i64 {
    let Some(value) = raw else {
        return 0;
    };

    let cleaned = value.replace('$', "").replace(',', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return 0;
    }

    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 && v <= i64::MAX as f64 => v.trunc() as i64,
        _ => 0,
    }
}
