//! Voxweave - 多角色对话音频生成服务
//!
//! 流水线: 脚本 JSON → 逐条 TTS 合成 → 静音拼接 → 单个 MP3

use std::sync::Arc;

use voxweave::application::synthesizer::SynthesizerConfig;
use voxweave::application::{AudioCombiner, DialogueSynthesizer, GenerateAudioHandler};
use voxweave::config::{load_config, print_config};
use voxweave::infrastructure::adapters::{ElevenLabsClient, ElevenLabsClientConfig, FileAudioStore, Mp3Codec};
// use voxweave::infrastructure::adapters::{FakeTtsClient, FakeTtsClientConfig};
use voxweave::infrastructure::http::{AppState, HttpServer, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},voxweave={},tower_http=debug",
        config.log.level, config.log.level
    );
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));
    if config.log.json {
        tracing_subscriber::fmt().json().with_env_filter(env_filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    tracing::info!("Voxweave - 对话音频生成服务");
    print_config(&config);

    // 凭证缺失是致命前置条件，任何运行都无法开始
    let api_key = config.tts.resolved_api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "TTS API key missing: set VOXWEAVE_TTS__API_KEY or ELEVEN_API_KEY"
        )
    })?;

    // 文件存储（确保输出目录存在）
    let store = Arc::new(
        FileAudioStore::new(&config.storage.output_dir, &config.storage.final_filename)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to prepare output directory: {}", e))?,
    );

    // ElevenLabs TTS 客户端
    let tts_config = ElevenLabsClientConfig {
        base_url: config.tts.base_url.clone(),
        api_key,
        model_id: config.tts.model_id.clone(),
        timeout_secs: config.tts.timeout_secs,
    };
    let tts_engine = Arc::new(ElevenLabsClient::new(tts_config)?);

    // // Fake TTS 客户端（本地开发用，不消耗远端配额）
    // let tts_engine = Arc::new(FakeTtsClient::new(FakeTtsClientConfig {
    //     duration_ms: 2000,
    //     sample_rate: 22050,
    // }));

    // 两段式流水线
    let synthesizer = DialogueSynthesizer::new(
        SynthesizerConfig::default(), // 固定音色参数的唯一持有者
        tts_engine,
        store.clone(),
    );
    let combiner = AudioCombiner::new(Arc::new(Mp3Codec::new(config.audio.bitrate_kbps)));
    let generate_handler =
        GenerateAudioHandler::new(synthesizer, combiner, store.clone(), config.audio.pause_ms);

    // HTTP 服务器
    let mut server_config = ServerConfig::new(&config.server.host, config.server.port);
    if config.server.static_files.enabled {
        server_config = server_config.with_static_dir(&config.server.static_files.dir);
    }
    let state = AppState::new(generate_handler, store, config.server.public_base_url());

    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
