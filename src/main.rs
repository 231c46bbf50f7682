use anyhow::Result;
use exam_engine::app::App;
use exam_engine::config::Config;
use exam_engine::logger;

fn main() -> Result<()> {
    // 初始化日志
    logger::init();

    // 加载配置
    let config = Config::from_env();

    // 初始化并运行应用
    App::initialize(config)?.run()?;

    Ok(())
}
