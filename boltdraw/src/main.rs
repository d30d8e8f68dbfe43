use image::ImageOutputFormat;
use std::path::PathBuf;
use structopt::StructOpt;
use topo::RegionOfInterest;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "boltdraw",
    about = "A tool to annotate climbing photos with located bolts and measured spans"
)]
struct Opt {
    /// The reference bolt-hanger width in inches used to calibrate distances.
    #[structopt(short, long, default_value = "2.25")]
    diameter: f64,
    /// A normalized region to search, as `left,top,right,bottom` with each
    /// component in [0, 1]. May be given multiple times; defaults to the full
    /// image.
    #[structopt(short, long, number_of_values = 1, parse(try_from_str = parse_region))]
    region: Vec<RegionOfInterest>,
    /// The output path to write to (autodetects image type from extension).
    ///
    /// If this is not provided, then the output goes to stdout as a PNG.
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
    /// The image file to measure bolts on.
    #[structopt(parse(from_os_str))]
    input: PathBuf,
}

fn parse_region(s: &str) -> Result<RegionOfInterest, String> {
    let components: Vec<f64> = s
        .split(',')
        .map(|c| c.trim().parse::<f64>().map_err(|e| e.to_string()))
        .collect::<Result<_, _>>()?;
    match components.as_slice() {
        &[left, top, right, bottom] => Ok(RegionOfInterest::new(left, top, right, bottom)),
        _ => Err(format!(
            "expected `left,top,right,bottom`, got {} components",
            components.len()
        )),
    }
}

fn main() {
    pretty_env_logger::init();
    let opt = Opt::from_args();
    let image = image::open(opt.input).expect("failed to open image file");
    let regions = if opt.region.is_empty() {
        vec![RegionOfInterest::full()]
    } else {
        opt.region
    };
    let image = boltdraw::render_bolt_measurements(&image, &regions, opt.diameter);
    if let Some(path) = opt.output {
        image.save(path).expect("failed to write image");
    } else {
        let mut encoded = std::io::Cursor::new(Vec::new());
        image
            .write_to(&mut encoded, ImageOutputFormat::Png)
            .expect("failed to encode image");
        std::io::Write::write_all(&mut std::io::stdout().lock(), encoded.get_ref())
            .expect("failed to write image to stdout");
    }
}
