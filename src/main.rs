use std::env;
use std::path::PathBuf;
use std::process;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tabreg::{
    Dataset, LinearRegression, LogSink, NeuralRegression, RegressionData, Regressor,
    StandardScaler, Trainer, TrainingConfig, metrics, solve_analytically,
};

const USAGE: &str = "Usage: tabreg <linear_regression|nn> <train.csv> [test.csv] \
[-epochs N] [-hidden_size H] [-learning_rate LR] [-seed S] [-config cfg.json] \
[-test_size F] [-standardize] [-no_header] [-history out.csv]

CSV files are read with a header row unless -no_header is given.";

#[derive(Debug, Clone, Copy, PartialEq)]
enum ModelKind {
    Linear,
    Neural,
}

#[derive(Debug)]
struct Options {
    model: ModelKind,
    train_path: PathBuf,
    test_path: Option<PathBuf>,
    config: TrainingConfig,
    test_size: f64,
    standardize: bool,
    has_headers: bool,
    history_path: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(msg) => {
            eprintln!("{msg}");
            eprintln!("{USAGE}");
            process::exit(2);
        }
    };

    if let Err(e) = run(options) {
        log::error!("{e}");
        process::exit(1);
    }
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut positional = Vec::new();
    let mut config_path = None;
    let mut epochs = None;
    let mut hidden_size = None;
    let mut learning_rate = None;
    let mut seed = None;
    let mut test_size = 0.2;
    let mut standardize = false;
    let mut has_headers = true;
    let mut history_path = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let mut value = |name: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("missing value for {name}"))
        };

        match arg.trim_start_matches('-') {
            "epochs" if arg.starts_with('-') => epochs = Some(parse(&value("-epochs")?)?),
            "hidden_size" if arg.starts_with('-') => {
                hidden_size = Some(parse(&value("-hidden_size")?)?)
            }
            "learning_rate" if arg.starts_with('-') => {
                learning_rate = Some(parse(&value("-learning_rate")?)?)
            }
            "seed" if arg.starts_with('-') => seed = Some(parse(&value("-seed")?)?),
            "config" if arg.starts_with('-') => config_path = Some(PathBuf::from(value("-config")?)),
            "test_size" if arg.starts_with('-') => test_size = parse(&value("-test_size")?)?,
            "standardize" if arg.starts_with('-') => standardize = true,
            "no_header" if arg.starts_with('-') => has_headers = false,
            "history" if arg.starts_with('-') => history_path = Some(PathBuf::from(value("-history")?)),
            _ if arg.starts_with('-') => return Err(format!("unknown option: {arg}")),
            _ => positional.push(arg.clone()),
        }
    }

    let model = match positional.first().map(String::as_str) {
        Some("linear_regression") => ModelKind::Linear,
        Some("nn") => ModelKind::Neural,
        Some(other) => {
            return Err(format!(
                "unknown model: {other}, use 'linear_regression' or 'nn'"
            ));
        }
        None => return Err("missing model".to_string()),
    };
    let train_path = positional
        .get(1)
        .map(PathBuf::from)
        .ok_or_else(|| "missing training CSV".to_string())?;
    let test_path = positional.get(2).map(PathBuf::from);
    if positional.len() > 3 {
        return Err(format!("unexpected argument: {}", positional[3]));
    }

    let mut config = match config_path {
        Some(path) => TrainingConfig::from_json_file(&path).map_err(|e| e.to_string())?,
        None => TrainingConfig::new(),
    };
    if let Some(epochs) = epochs {
        config = config.epochs(epochs);
    }
    if let Some(hidden_size) = hidden_size {
        config = config.hidden_size(hidden_size);
    }
    if let Some(learning_rate) = learning_rate {
        config = config.learning_rate(learning_rate);
    }
    if let Some(seed) = seed {
        config = config.seed(seed);
    }

    Ok(Options {
        model,
        train_path,
        test_path,
        config,
        test_size,
        standardize,
        has_headers,
        history_path,
    })
}

fn parse<T: std::str::FromStr>(value: &str) -> Result<T, String>
where
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| format!("invalid value {value:?}: {e}"))
}

fn load_data(options: &Options) -> tabreg::Result<RegressionData> {
    let dataset = Dataset::from_csv(&options.train_path, options.has_headers)?;
    let (mut train, mut test) = match &options.test_path {
        Some(path) => (dataset, Dataset::from_csv(path, options.has_headers)?),
        None => dataset.train_test_split(options.test_size)?,
    };

    if options.standardize {
        let mut scaler = StandardScaler::new();
        train.features = scaler.fit_transform(&train.features)?;
        test.features = scaler.transform(&test.features)?;
    }

    let data = RegressionData::new(train, test)?;
    Ok(match options.model {
        ModelKind::Linear => data.with_bias(),
        ModelKind::Neural => data,
    })
}

fn run(options: Options) -> tabreg::Result<()> {
    options.config.validate()?;
    let mut data = load_data(&options)?;
    log::info!(
        "{} training and {} test samples with {} features",
        data.train.n_samples(),
        data.test.n_samples(),
        data.n_features()
    );

    let mut rng = StdRng::seed_from_u64(options.config.seed);

    let reference = match options.model {
        ModelKind::Linear => Some(solve_analytically(&data.train.features, &data.train.targets)?),
        ModelKind::Neural => None,
    };

    let mut model: Box<dyn Regressor> = match options.model {
        ModelKind::Linear => Box::new(LinearRegression::new(data.n_features())),
        ModelKind::Neural => Box::new(NeuralRegression::new(
            data.n_features(),
            options.config.hidden_size,
            &mut rng,
        )?),
    };

    let mut trainer = Trainer::new(options.config.clone(), rng);
    let history = trainer.fit(&mut *model, &mut data, reference.as_ref(), &mut LogSink)?;

    let test_pred = model.predict(&data.test.features)?;
    if let Some(last) = history.final_record() {
        log::info!(
            "final loss (train) {:.3} | loss (test) {:.3} | test MAE {:.3} | test R² {:.3}",
            last.train_rmse,
            last.test_rmse,
            metrics::mean_absolute_error(&data.test.targets, &test_pred)?,
            metrics::r2_score(&data.test.targets, &test_pred)?
        );
    }

    if let Some(reference) = reference {
        let closed_form = LinearRegression::from_weights(reference);
        log::info!(
            "closed-form solution: loss (train) {:.3} | loss (test) {:.3}",
            closed_form.evaluate(&data.train.features, &data.train.targets)?,
            closed_form.evaluate(&data.test.features, &data.test.targets)?
        );
    }

    if let Some(path) = &options.history_path {
        history.write_csv(path)?;
        log::info!("wrote training history to {}", path.display());
    }

    Ok(())
}
