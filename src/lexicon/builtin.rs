//! A small built-in lexicon of computing vocabulary.

use crate::error::Result;
use crate::lexicon::memory::{MemoryLexicon, SenseRecord};

/// Words resolved into the cache when an engine starts.
pub const SEED_WORDS: &[&str] = &[
    "hello",
    "world",
    "python",
    "react",
    "javascript",
    "computer",
    "programming",
    "algorithm",
    "database",
    "interface",
    "security",
    "network",
    "internet",
    "authentication",
    "authorization",
    "dictionary",
    "language",
    "keyboard",
    "mouse",
    "screen",
    "software",
    "hardware",
    "function",
    "variable",
    "class",
    "object",
    "method",
    "property",
    "syntax",
    "semantics",
    "compiler",
    "interpreter",
    "browser",
    "server",
    "client",
    "request",
    "response",
    "protocol",
    "cookie",
    "session",
    "token",
    "api",
    "rest",
    "graphql",
    "json",
    "xml",
    "html",
    "css",
];

/// (id, definition, lemmas, broader ids)
type Entry = (&'static str, &'static str, &'static [&'static str], &'static [&'static str]);

#[rustfmt::skip]
const ENTRIES: &[Entry] = &[
    // relation nodes
    ("entity.n.01", "that which is perceived or known or inferred to have its own distinct existence", &["entity"], &[]),
    ("device.n.01", "an instrumentality invented for a particular purpose", &["device"], &["entity.n.01"]),
    ("reptile.n.01", "any cold-blooded vertebrate of the class Reptilia", &["reptile", "reptilian"], &["entity.n.01"]),
    ("snake.n.01", "limbless scaly elongate reptile; some are venomous", &["snake", "serpent", "ophidian"], &["reptile.n.01"]),
    ("boa.n.02", "any of several chiefly tropical constrictors with vestigial hind limbs", &["boa"], &["snake.n.01"]),
    ("rodent.n.01", "relatively small placental mammals having a single pair of constantly growing incisor teeth", &["rodent", "gnawer"], &["entity.n.01"]),
    ("rat.n.01", "any of various long-tailed rodents similar to but larger than a mouse", &["rat"], &["rodent.n.01"]),
    ("language.n.01", "a systematic means of communicating by the use of sounds or conventional symbols", &["language", "linguistic_communication"], &["entity.n.01"]),
    ("programming_language.n.01", "a language designed for programming computers", &["programming_language"], &["language.n.01"]),
    ("markup_language.n.01", "a set of tags and rules for annotating a text so that it can be formatted or interpreted", &["markup_language"], &["language.n.01"]),
    ("script.n.03", "a program that is interpreted rather than compiled", &["script"], &["programming_language.n.01"]),
    ("program.n.07", "a sequence of instructions that a computer can interpret and execute", &["program", "programme", "computer_program"], &["software.n.01"]),
    ("greeting.n.01", "an acknowledgment or expression of good will", &["greeting", "salutation"], &["entity.n.01"]),
    ("format.n.01", "the general appearance of a publication or data layout", &["format", "data_format"], &["entity.n.01"]),
    ("procedure.n.01", "a particular course of action intended to achieve a result", &["procedure", "process"], &["entity.n.01"]),
    ("library.n.05", "a collection of standard programs and subroutines for immediate use", &["library", "program_library"], &["software.n.01"]),
    ("message.n.02", "a communication that is sent from one party to another", &["message", "content"], &["entity.n.01"]),
    ("computer_science.n.01", "the branch of engineering science that studies computable processes and structures", &["computer_science", "computing"], &["entity.n.01"]),
    // seed vocabulary
    ("hello.n.01", "an expression of greeting", &["hello", "hullo", "hi", "howdy"], &["greeting.n.01"]),
    ("world.n.01", "everything that exists anywhere", &["world", "universe", "cosmos"], &["entity.n.01"]),
    ("world.n.02", "all of the living human inhabitants of the earth", &["world", "humanity", "mankind"], &["entity.n.01"]),
    ("python.n.01", "large Old World boas", &["python"], &["boa.n.02"]),
    ("python.n.02", "a high-level general-purpose programming language", &["python"], &["programming_language.n.01"]),
    ("react.v.01", "show a response or a reaction to something", &["react", "respond"], &[]),
    ("react.n.01", "a javascript library for building user interfaces from components", &["react"], &["library.n.05"]),
    ("javascript.n.01", "a scripting language that runs in web browsers", &["javascript"], &["script.n.03"]),
    ("computer.n.01", "a machine for performing calculations automatically", &["computer", "computing_machine", "data_processor"], &["device.n.01"]),
    ("programming.n.01", "creating a sequence of instructions to enable the computer to do something", &["programming", "programing", "coding"], &["computer_science.n.01"]),
    ("algorithm.n.01", "a precise rule or set of rules specifying how to solve some problem", &["algorithm", "algorithmic_rule"], &["procedure.n.01"]),
    ("database.n.01", "an organized body of related information", &["database"], &["entity.n.01"]),
    ("interface.n.01", "the overlap where two areas or systems meet and interact", &["interface"], &["entity.n.01"]),
    ("interface.n.02", "a program that controls a display for the user and allows the user to interact with the system", &["interface", "user_interface"], &["program.n.07"]),
    ("security.n.01", "the state of being free from danger or injury", &["security"], &["entity.n.01"]),
    ("security.n.04", "measures taken to protect a computer system against unauthorized access", &["security", "computer_security"], &["procedure.n.01"]),
    ("network.n.01", "an interconnected system of things or people", &["network", "web"], &["entity.n.01"]),
    ("network.n.03", "a system of interconnected computers that exchange data", &["network", "computer_network"], &["device.n.01"]),
    ("internet.n.01", "a computer network consisting of a worldwide network of computer networks", &["internet", "net", "cyberspace"], &["network.n.03"]),
    ("authentication.n.01", "validating the identity of a user or process", &["authentication", "hallmark"], &["procedure.n.01"]),
    ("authorization.n.01", "the act of conferring legality or sanction or formal warrant", &["authorization", "authorisation", "empowerment"], &["procedure.n.01"]),
    ("dictionary.n.01", "a reference book containing an alphabetical list of words with information about them", &["dictionary", "lexicon"], &["entity.n.01"]),
    ("dictionary.n.02", "a data structure mapping keys to values", &["dictionary", "map", "associative_array"], &["entity.n.01"]),
    ("keyboard.n.01", "device consisting of a set of keys on a piano or organ or typewriter or computer", &["keyboard"], &["device.n.01"]),
    ("mouse.n.01", "any of numerous small rodents typically resembling diminutive rats", &["mouse"], &["rodent.n.01"]),
    ("mouse.n.04", "a hand-operated electronic device that controls the coordinates of a cursor on a computer screen", &["mouse", "computer_mouse"], &["device.n.01"]),
    ("screen.n.01", "the display that is electronically created on the surface of a cathode-ray tube or panel", &["screen", "display", "monitor"], &["device.n.01"]),
    ("software.n.01", "written programs or procedures pertaining to the operation of a computer system", &["software", "software_system", "software_package"], &["entity.n.01"]),
    ("hardware.n.01", "the mechanical and electronic parts that constitute a computer system", &["hardware", "computer_hardware"], &["device.n.01"]),
    ("function.n.01", "what something is used for", &["function", "purpose", "role"], &["entity.n.01"]),
    ("function.n.07", "a set sequence of steps, part of a larger computer program", &["function", "subroutine", "routine", "subprogram"], &["program.n.07"]),
    ("variable.n.01", "something that is likely to vary", &["variable"], &["entity.n.01"]),
    ("variable.n.02", "a named storage location whose value may change while a program runs", &["variable"], &["entity.n.01"]),
    ("class.n.01", "a collection of things sharing a common attribute", &["class", "category", "family"], &["entity.n.01"]),
    ("class.n.09", "a template that defines the data and behaviour of a kind of object", &["class"], &["entity.n.01"]),
    ("object.n.01", "a tangible and visible entity", &["object", "physical_object"], &["entity.n.01"]),
    ("object.n.05", "a bundle of data together with the methods that operate on it", &["object"], &["entity.n.01"]),
    ("method.n.01", "a way of doing something, especially a systematic way", &["method"], &["procedure.n.01"]),
    ("method.n.02", "a function associated with a class or object", &["method"], &["function.n.07"]),
    ("property.n.01", "something owned; any tangible or intangible possession", &["property", "belongings", "holding"], &["entity.n.01"]),
    ("property.n.02", "a basic or essential attribute shared by all members of a class", &["property"], &["entity.n.01"]),
    ("syntax.n.01", "the grammatical arrangement of words in sentences", &["syntax"], &["language.n.01"]),
    ("syntax.n.03", "the rules governing the structure of statements in a programming language", &["syntax", "grammar"], &["programming_language.n.01"]),
    ("semantics.n.01", "the study of language meaning", &["semantics"], &["language.n.01"]),
    ("compiler.n.01", "a program that decodes instructions written in a higher order language and produces an assembly language program", &["compiler", "compiling_program"], &["program.n.07"]),
    ("interpreter.n.01", "someone who mediates between speakers of different languages", &["interpreter", "translator"], &["entity.n.01"]),
    ("interpreter.n.02", "a program that translates and executes source language statements one line at a time", &["interpreter", "interpretive_program"], &["program.n.07"]),
    ("browser.n.01", "a program used to view HTML documents", &["browser", "web_browser"], &["program.n.07"]),
    ("server.n.03", "a computer that provides client stations with access to files and printers as shared resources", &["server", "host"], &["computer.n.01"]),
    ("client.n.01", "someone who pays for goods or services", &["client", "customer"], &["entity.n.01"]),
    ("client.n.03", "a computer or program that requests services from a server", &["client", "guest"], &["computer.n.01"]),
    ("request.n.01", "a formal message requesting something that is submitted to an authority", &["request", "petition", "postulation"], &["message.n.02"]),
    ("response.n.01", "a result", &["response"], &["entity.n.01"]),
    ("response.n.02", "a message sent back in answer to a request", &["response", "reply", "answer"], &["message.n.02"]),
    ("protocol.n.01", "forms of ceremony and etiquette observed by diplomats and heads of state", &["protocol"], &["entity.n.01"]),
    ("protocol.n.02", "a set of rules governing the format of messages exchanged between computers", &["protocol", "communications_protocol"], &["procedure.n.01"]),
    ("cookie.n.01", "any of various small flat sweet cakes", &["cookie", "cooky", "biscuit"], &["entity.n.01"]),
    ("cookie.n.03", "a short piece of data stored by a browser on behalf of a web server", &["cookie"], &["format.n.01"]),
    ("session.n.01", "a meeting for execution of a group's functions", &["session"], &["entity.n.01"]),
    ("session.n.04", "a period of interaction between a client and a server", &["session"], &["entity.n.01"]),
    ("token.n.01", "an individual instance of a type of symbol", &["token", "item"], &["entity.n.01"]),
    ("token.n.02", "a credential issued to a client to prove its identity", &["token", "access_token"], &["entity.n.01"]),
    ("api.n.01", "a set of definitions through which programs communicate with each other", &["api", "application_programming_interface"], &["interface.n.02"]),
    ("rest.n.01", "a pause for relaxation", &["rest", "respite", "relief"], &["entity.n.01"]),
    ("rest.n.06", "an architectural style for networked applications built on stateless requests", &["rest"], &["protocol.n.02"]),
    ("json.n.01", "a lightweight text format for structured data based on javascript object syntax", &["json"], &["format.n.01"]),
    ("xml.n.01", "a markup language that describes data with user-defined tags", &["xml", "extensible_markup_language"], &["markup_language.n.01"]),
    ("html.n.01", "a set of tags and rules for creating hypertext documents on the world wide web", &["html", "hypertext_markup_language"], &["markup_language.n.01"]),
    ("css.n.01", "a style sheet language describing the presentation of html documents", &["css", "cascading_style_sheets"], &["language.n.01"]),
];

/// Factory for built-in lexicons.
pub struct BuiltinLexicon;

impl BuiltinLexicon {
    /// Lexicon covering the seed vocabulary, with hypernym links.
    ///
    /// `graphql` is intentionally absent so that seeding exercises the
    /// unresolved path.
    pub fn computing() -> Result<MemoryLexicon> {
        let mut lexicon = MemoryLexicon::new();
        for (id, definition, lemmas, _) in ENTRIES {
            lexicon.add_sense(SenseRecord {
                id: id.to_string(),
                definition: definition.to_string(),
                lemmas: lemmas.iter().map(|l| l.to_string()).collect(),
                broader: Vec::new(),
                narrower: Vec::new(),
            })?;
        }
        for (id, _, _, broader) in ENTRIES {
            for parent in broader.iter() {
                lexicon.link(parent, id)?;
            }
        }
        Ok(lexicon)
    }

    /// Get the built-in seed word list as owned strings.
    pub fn seed_words() -> Vec<String> {
        SEED_WORDS.iter().map(|w| w.to_string()).collect()
    }
}
