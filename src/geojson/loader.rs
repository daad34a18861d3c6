use std::{fs::File, io::{BufReader, Read}};

use bevy::prelude::*;
use crossbeam_channel::{Receiver, TryRecvError, bounded};

use crate::{
    error::GlobeResult,
    settings::{DatasetSettings, GlobeSettings},
    types::{DrawOptions, GeoContainer},
};

use super::{DashStyle, draw_three_geo, parse_document};

/// Raw text of one dataset, fetched off the main thread.
pub struct LoadedDataset {
    pub source: String,
    pub options: DrawOptions,
    pub text: GlobeResult<String>,
}

#[derive(Resource, Deref)]
pub struct DatasetReceiver(Receiver<LoadedDataset>);

/// Marks the entity holding one dataset's primitives.
#[derive(Component, Debug, Clone)]
pub struct Dataset {
    pub source: String,
}

/// Reads a dataset from disk, or over HTTP when the source is a URL.
pub fn fetch_dataset(source: &str) -> GlobeResult<String> {
    if source.starts_with("http://") || source.starts_with("https://") {
        let mut response = ureq::get(source).call()?;
        Ok(response.body_mut().read_to_string()?)
    } else {
        let mut reader = BufReader::new(File::open(source)?);
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(text)
    }
}

/// Turns raw GeoJSON text into a ready-to-spawn container.
pub fn build_container(text: &str, options: &DrawOptions) -> GlobeResult<GeoContainer> {
    draw_three_geo(parse_document(text)?, options)
}

pub fn request_datasets(mut commands: Commands, settings: Res<GlobeSettings>) {
    if settings.datasets.is_empty() {
        warn!("No datasets configured, the globe will have no outlines");
        return;
    }

    let (tx, rx) = bounded::<LoadedDataset>(settings.datasets.len());
    for dataset in settings.datasets.clone() {
        let tx = tx.clone();
        let options = dataset_options(&settings, &dataset);
        std::thread::spawn(move || {
            info!("Fetching {}", dataset.source);
            let text = fetch_dataset(&dataset.source);
            let _ = tx.send(LoadedDataset {
                source: dataset.source,
                options,
                text,
            });
        });
    }

    commands.insert_resource(DatasetReceiver(rx));
}

pub fn read_dataset_receiver(mut commands: Commands, receiver: Option<Res<DatasetReceiver>>) {
    let Some(receiver) = receiver else {
        return;
    };

    loop {
        let loaded = match receiver.try_recv() {
            Ok(loaded) => loaded,
            Err(TryRecvError::Empty) => break,
            Err(TryRecvError::Disconnected) => {
                debug!("All datasets received");
                commands.remove_resource::<DatasetReceiver>();
                break;
            }
        };

        let container = loaded
            .text
            .and_then(|text| build_container(&text, &loaded.options));

        match container {
            Ok(container) => {
                info!(
                    "Loaded {}: {} lines, {} points",
                    loaded.source,
                    container.lines().count(),
                    container.points().count()
                );
                commands.spawn((
                    Name::new(loaded.source.clone()),
                    Dataset {
                        source: loaded.source,
                    },
                    container.transform(),
                    DashStyle::from(&loaded.options.material),
                    container,
                ));
            }
            Err(e) => error!("Skipping {}: {}", loaded.source, e),
        }
    }
}

fn dataset_options(settings: &GlobeSettings, dataset: &DatasetSettings) -> DrawOptions {
    DrawOptions {
        radius: settings.radius,
        material: dataset.material.clone(),
    }
}
