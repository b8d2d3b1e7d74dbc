//! Portunus worker - runs a partition-assigned consumer against the
//! repository change topics and logs every record it receives.
//!
//! Usage:
//!   portunus-worker --topics trellis.cache --partitions 0
//!   portunus-worker --topics trellis.ldpcontainment.add,trellis.ldpmembership.add --partitions 0,1
//!
//! Downstream materialization (container listings, read caches) plugs in by
//! replacing the logging handler with a use-case specific one.

use clap::Parser;
use portunus::config::ConsumerConfig;
use portunus::consumer::{
    ConsumerRecord, ConsumerRunner, KafkaRecordStream, RecordHandler, TopicPartition,
};
use std::thread;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "portunus-worker")]
#[command(about = "Portunus worker - consume repository change events from the broker")]
struct Args {
    /// Broker bootstrap servers
    #[arg(long, default_value = "localhost:9092")]
    brokers: String,

    /// Consumer group identifier
    #[arg(long, default_value = "trellis")]
    group_id: String,

    /// Topics to consume (comma-separated)
    #[arg(short, long)]
    topics: String,

    /// Partitions to assign for each topic (comma-separated)
    #[arg(short, long, default_value = "0")]
    partitions: String,

    /// Poll timeout in milliseconds
    #[arg(long, default_value = "100")]
    poll_timeout_ms: u64,
}

struct LoggingHandler;

impl RecordHandler for LoggingHandler {
    fn handle_records(&mut self, records: Vec<ConsumerRecord>) {
        for record in records {
            info!(
                "Received record on {} [{}] at offset {} for {}",
                record.topic,
                record.partition,
                record.offset,
                record.message.identifier
            );
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = Args::parse();

    let topics: Vec<String> = args.topics.split(',').map(|s| s.trim().to_string()).collect();
    let partitions: Vec<i32> = args
        .partitions
        .split(',')
        .map(|s| s.trim().parse())
        .collect::<Result<_, _>>()
        .map_err(|err| format!("invalid partition list: {err}"))?;

    let mut assignment = Vec::new();
    for topic in &topics {
        for partition in &partitions {
            assignment.push(TopicPartition::new(topic.clone(), *partition));
        }
    }

    let config = ConsumerConfig {
        bootstrap_servers: args.brokers,
        group_id: args.group_id,
        poll_timeout_ms: args.poll_timeout_ms,
        ..ConsumerConfig::from_env()
    };

    info!("Starting worker for {:?} on partitions {:?}", topics, partitions);

    let stream = KafkaRecordStream::assigned(&config, &assignment)?;
    let runner = ConsumerRunner::new(stream, LoggingHandler, config.poll_timeout());
    let handle = runner.shutdown_handle();

    ctrlc::set_handler(move || {
        handle.shutdown();
    })?;

    let worker = thread::spawn(move || runner.run());
    match worker.join() {
        Ok(Ok(())) => {
            info!("Worker stopped cleanly");
            Ok(())
        }
        Ok(Err(err)) => Err(Box::new(err) as Box<dyn std::error::Error>),
        Err(_) => Err("worker thread panicked".into()),
    }
}
