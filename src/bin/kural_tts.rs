use clap::Parser;
use kuralsearch::{
    cli::{self, SpeechCli},
    error::Result,
    logging,
    speech::{self, GoogleTts},
};

fn main() -> Result<()> {
    let args = SpeechCli::parse();
    logging::init_tracing();

    let (Some(text), Some(language)) = (args.text, args.language) else {
        println!("Usage: kural-tts <text> <language>");
        std::process::exit(1);
    };

    let payload =
        speech::text_to_speech(&GoogleTts::default(), &text, &language);
    cli::print_json(&payload)
}
