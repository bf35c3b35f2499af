//! Static lookup tables backing the rule-based alert analysis.
//!
//! Everything in this module is pure data. The tables are bilingual
//! (Chinese/English) because production alerts arrive in both languages,
//! often mixed within a single message. Iteration order is significant:
//! keyword causes are appended in table order and severity ties keep the
//! first entry reaching the winning weight.

use std::collections::HashMap;

/// Regex patterns used to pull candidate error codes out of alert text.
/// Kept as data so new formats can be added without touching control flow.
pub const ERROR_CODE_PATTERNS: &[&str] = &[
    r"(?:错误码[:：]\s*)?(\d{4,6})",
    r"(?i)error\s*code[:：]?\s*(\d{4,6})",
    r"(?i)code[:：]?\s*(\d{4,6})",
    r"\b(\d{5})\b",
];

/// Keyword -> probable-cause description, scanned in order.
/// All matching entries contribute a cause; this is a union, not first-match.
pub const KEYWORD_CAUSES: &[(&str, &str)] = &[
    ("超时", "网络连接超时或服务响应时间过长"),
    ("timeout", "服务响应超时"),
    ("连接失败", "网络连接问题或目标服务不可用"),
    ("connection failed", "连接建立失败"),
    ("内存不足", "系统内存资源耗尽"),
    ("out of memory", "内存溢出"),
    ("磁盘空间", "磁盘存储空间不足"),
    ("disk space", "磁盘空间问题"),
    ("CPU", "CPU资源使用率过高"),
    ("数据库", "数据库连接或查询问题"),
    ("database", "数据库相关问题"),
    ("权限", "访问权限不足或认证失败"),
    ("permission", "权限验证问题"),
    ("配置", "系统配置错误或缺失"),
    ("config", "配置相关问题"),
    ("aladdin", "aladdin服务相关问题"),
    ("SSL", "SSL证书或安全连接问题"),
    ("DNS", "域名解析问题"),
    ("负载", "系统负载过高"),
    ("load", "系统负载问题"),
];

/// A severity level with its trigger keywords and ranking weight.
pub struct SeverityEntry {
    pub label: &'static str,
    pub weight: u32,
    pub keywords: &'static [&'static str],
}

/// Severity levels ordered from most to least severe. The highest weight
/// with a keyword hit wins; ties keep the earlier entry.
pub const SEVERITY_TABLE: &[SeverityEntry] = &[
    SeverityEntry {
        label: "严重",
        weight: 4,
        keywords: &["严重", "critical", "宕机", "不可用", "业务中断", "大规模", "数据丢失"],
    },
    SeverityEntry {
        label: "高",
        weight: 3,
        keywords: &["高", "high", "失败", "异常", "错误", "超时", "timeout", "无法"],
    },
    SeverityEntry {
        label: "中",
        weight: 2,
        keywords: &["中", "warning", "缓慢", "波动", "重试", "下降"],
    },
    SeverityEntry {
        label: "低",
        weight: 1,
        keywords: &["低", "low", "轻微", "偶发"],
    },
    SeverityEntry {
        label: "信息",
        weight: 0,
        keywords: &["信息", "info", "通知"],
    },
];

/// Default severity label when no keyword matches anything.
pub const DEFAULT_SEVERITY: &str = "信息";

/// Known system components, checked by case-insensitive containment.
pub const SYSTEM_COMPONENTS: &[&str] = &[
    "aladdin",
    "mysql",
    "postgresql",
    "redis",
    "kafka",
    "nginx",
    "elasticsearch",
    "数据库",
    "缓存",
    "消息队列",
    "网关",
    "负载均衡",
    "认证服务",
    "支付服务",
];

/// Remediation template for one problem category.
pub struct ResponseTemplate {
    pub category: &'static str,
    /// Lowercase keywords whose presence selects this template.
    pub triggers: &'static [&'static str],
    pub immediate: &'static [&'static str],
    pub long_term: &'static [&'static str],
}

/// Category templates are additive: every category whose trigger hits
/// contributes its actions.
pub const RESPONSE_TEMPLATES: &[ResponseTemplate] = &[
    ResponseTemplate {
        category: "aladdin",
        triggers: &["aladdin"],
        immediate: &[
            "检查aladdin服务进程状态和健康检查接口",
            "查看aladdin服务日志中的错误和超时记录",
            "验证到aladdin服务的网络连通性",
            "必要时重启aladdin服务或切换到备用实例",
        ],
        long_term: &[
            "为aladdin服务增加容量和连接池监控告警",
            "完善aladdin服务的降级和熔断策略",
            "与aladdin服务提供方建立故障联动机制",
        ],
    },
    ResponseTemplate {
        category: "database",
        triggers: &["数据库", "database", "mysql", "postgresql", "redis"],
        immediate: &[
            "检查数据库连接池状态和当前连接数",
            "查看数据库慢查询日志和锁等待情况",
            "验证数据库主从复制和磁盘空间状态",
            "必要时重启应用连接池释放泄漏连接",
        ],
        long_term: &[
            "优化慢查询并补充必要的索引",
            "调整连接池容量并增加连接数告警",
            "制定数据库扩容和读写分离方案",
        ],
    },
    ResponseTemplate {
        category: "network",
        triggers: &["网络", "network", "连接", "connection", "dns", "ssl"],
        immediate: &[
            "检查网络链路连通性和丢包率",
            "验证DNS解析和SSL证书有效期",
            "查看负载均衡器后端节点健康状态",
            "确认防火墙和安全组规则未发生变更",
        ],
        long_term: &[
            "部署网络质量持续监控和链路告警",
            "建立证书到期自动提醒和轮换流程",
            "规划冗余链路和故障自动切换",
        ],
    },
    ResponseTemplate {
        category: "resource",
        triggers: &["cpu", "内存", "memory", "磁盘", "disk"],
        immediate: &[
            "定位占用资源最高的进程并评估是否异常",
            "清理磁盘临时文件和过期日志释放空间",
            "必要时对高负载实例进行扩容或重启",
            "检查是否存在内存泄漏或死循环",
        ],
        long_term: &[
            "调整资源使用率告警阈值并分级通知",
            "制定容量规划和弹性伸缩策略",
            "定期进行压力测试评估资源瓶颈",
        ],
    },
];

/// Generic immediate actions used when no category template matched.
pub const GENERIC_IMMEDIATE: &[&str] = &[
    "立即检查相关系统日志以获取更多详细信息",
    "验证系统核心功能和服务可用性",
    "监控系统资源使用情况（CPU、内存、磁盘、网络）",
    "如有必要，联系相关技术团队或服务提供商",
];

/// Generic long-term actions used when no category template matched.
pub const GENERIC_LONG_TERM: &[&str] = &[
    "建立更完善的监控和告警机制",
    "定期进行系统健康检查和性能评估",
    "完善故障应急响应流程和文档",
    "实施预防性维护计划",
];

/// Built-in error-code mapping. Callers can override or extend it at
/// analyzer construction / runtime.
pub fn default_error_codes() -> HashMap<String, String> {
    [
        ("10001", "请求参数无效"),
        ("10002", "认证失败或令牌过期"),
        ("10006", "数据库连接池耗尽"),
        ("10009", "系统资源不足"),
        ("10015", "aladdin服务请求超时"),
        ("10101", "网络链路异常"),
        ("50000", "内部服务错误"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}
