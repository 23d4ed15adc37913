use blockfall_engine::PieceKind;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ShapesArg {
    /// Only show these kinds (e.g. `TSZ`)
    #[clap(long)]
    only: Option<String>,
}

pub(crate) fn run(arg: &ShapesArg) {
    let ShapesArg { only } = arg;
    for kind in PieceKind::ALL {
        if only
            .as_ref()
            .is_some_and(|only| !only.to_ascii_uppercase().contains(kind.as_char()))
        {
            continue;
        }
        let (r, g, b) = kind.color().rgb();
        println!("{} ({:?}, rgb {r},{g},{b})", kind.as_char(), kind.color());
        for shape in kind.shape().orientations() {
            println!("{shape}");
            println!();
        }
    }
}
