//! 驱动匹配服务
//!
//! 读取硬件画像，套用落盘的规则集，输出命中的驱动分组：
//!
//! ```text
//! matchd [profile.json|-]        # 匹配画像（缺省从标准输入读取）
//! matchd remove-group <id>       # 删除驱动分组并清理规则集引用
//! ```

use anyhow::{Context, Result, bail};
use match_engine::{HardwareProfile, ProfileMatcher};
use match_shared::AppConfig;
use match_shared::observability;
use match_store::{DeleteEventBus, DriverGroupStorage, JsonFileStore, RuleSetStorage};
use parking_lot::Mutex;
use std::fs;
use std::io::Read;
use std::sync::Arc;
use tracing::{info, warn};

fn main() -> Result<()> {
    // 统一加载配置：config/matchd.toml + APP_ 前缀环境变量覆盖
    let config = AppConfig::load("matchd").unwrap_or_else(|e| {
        eprintln!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    observability::init(&config.observability)?;
    info!("Starting matchd...");

    fs::create_dir_all(&config.storage.data_dir)
        .with_context(|| format!("create data dir {:?}", config.storage.data_dir))?;

    // 打开存储并接好删除事件：驱动分组删除后，规则集侧自动剔除引用
    let bus = Arc::new(DeleteEventBus::new());
    let rule_sets = Arc::new(Mutex::new(RuleSetStorage::new(Box::new(
        JsonFileStore::new(config.storage.rule_set_path()),
    ))));
    RuleSetStorage::subscribe_driver_group_deletes(rule_sets.clone(), &bus);
    let mut driver_groups = DriverGroupStorage::new(
        Box::new(JsonFileStore::new(config.storage.driver_group_path())),
        bus,
    );

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("remove-group") => {
            let Some(id) = args.get(1) else {
                bail!("usage: matchd remove-group <id>");
            };
            driver_groups.remove(id)?;
            info!("Removed driver group {}", id);
            Ok(())
        }
        path => run_match(path, &rule_sets, &mut driver_groups),
    }
}

/// 匹配一份硬件画像并输出报告
fn run_match(
    profile_path: Option<&str>,
    rule_sets: &Arc<Mutex<RuleSetStorage>>,
    driver_groups: &mut DriverGroupStorage,
) -> Result<()> {
    let sets = rule_sets.lock().all()?;
    info!("Loaded {} rule sets", sets.len());

    let profile = read_profile(profile_path)?;

    let matcher = ProfileMatcher::new(&sets);
    let report = matcher.match_profile(&profile);
    info!(
        "Matched {} rule sets, {} driver groups",
        report.matched_rule_sets.len(),
        report.driver_group_ids.len()
    );

    let groups: Vec<_> = report
        .driver_group_ids
        .iter()
        .filter_map(|id| match driver_groups.get(id) {
            Ok(group) => Some(group),
            Err(e) => {
                warn!("规则集引用了不存在的驱动分组 {}: {}", id, e);
                None
            }
        })
        .collect();

    let output = serde_json::json!({
        "matched_rule_sets": report.matched_rule_sets,
        "driver_groups": groups,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

/// 从文件或标准输入读取硬件画像 JSON
fn read_profile(path: Option<&str>) -> Result<HardwareProfile> {
    let raw = match path {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("read profile from stdin")?;
            buf
        }
        Some(p) => fs::read_to_string(p).with_context(|| format!("read profile file {}", p))?,
    };

    serde_json::from_str(&raw).context("parse hardware profile")
}
