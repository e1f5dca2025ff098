//! Enumeration of common server numeric replies.
#![allow(non_camel_case_types)]
use std::str::FromStr;

macro_rules! make_response {
    ($($(#[$attr:meta])+ $variant:ident = $value:expr),+) => {
        /// Numeric replies from [RFC 2812](http://tools.ietf.org/html/rfc2812) and
        /// [Modern docs](https://modern.ircdocs.horse/#numerics) that a client commonly needs to
        /// recognize. Each variant is documented with its expected form.
        ///
        /// Unknown numerics are still available through `Message::numeric`.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[repr(u16)]
        pub enum Response {
            $($(#[$attr])+ $variant = $value),+
        }

        impl Response {
            /// Gets the response for a numeric code, if it is a known one.
            pub fn from_u16(val: u16) -> Option<Response> {
                match val {
                    $($value => Some(Response::$variant),)+
                    _ => None
                }
            }
        }
    }
}

make_response! {
    /// `001 Welcome to the Internet Relay Network <nick>!<user>@<host>`
    RPL_WELCOME         =   1,
    /// `002 Your host is <servername>, running version <ver>`
    RPL_YOURHOST        =   2,
    /// `003 This server was created <date>`
    RPL_CREATED         =   3,
    /// `004 <servername> <version> <available user modes> <available channel modes>`
    RPL_MYINFO          =   4,
    /// `005 <servername> *(<feature>(=<value>)) :are supported by this server`
    RPL_ISUPPORT        =   5,
    /// `221 <user mode string>`
    RPL_UMODEIS         = 221,
    /// `301 <nick> :<away message>`
    RPL_AWAY            = 301,
    /// `311 <nick> <user> <host> * :<real name>`
    RPL_WHOISUSER       = 311,
    /// `312 <nick> <server> :<server info>`
    RPL_WHOISSERVER     = 312,
    /// `317 <nick> <integer> :seconds idle`
    RPL_WHOISIDLE       = 317,
    /// `318 <nick> :End of WHOIS list`
    RPL_ENDOFWHOIS      = 318,
    /// `319 <nick> :*( ( "@" / "+" ) <channel> " " )`
    RPL_WHOISCHANNELS   = 319,
    /// `324 <channel> <mode> <mode params>`
    RPL_CHANNELMODEIS   = 324,
    /// `331 <channel> :No topic is set`
    RPL_NOTOPIC         = 331,
    /// `332 <channel> :<topic>`
    RPL_TOPIC           = 332,
    /// `353 ( "=" / "*" / "@" ) <channel> :[ "@" / "+" ] <nick> *( " " [ "@" / "+" ] <nick> )`
    ///
    /// Each name may carry the prefixes understood by `mode::parse_channel_modes`.
    RPL_NAMREPLY        = 353,
    /// `366 <channel> :End of NAMES list`
    RPL_ENDOFNAMES      = 366,
    /// `372 :- <text>`
    RPL_MOTD            = 372,
    /// `375 :- <server> Message of the day -`
    RPL_MOTDSTART       = 375,
    /// `376 :End of MOTD command`
    RPL_ENDOFMOTD       = 376,
    /// `671 <nick> :is using a secure connection` (Source: Modern)
    RPL_WHOISSECURE     = 671,
    /// `401 <nickname> :No such nick/channel`
    ERR_NOSUCHNICK      = 401,
    /// `403 <channel name> :No such channel`
    ERR_NOSUCHCHANNEL   = 403,
    /// `404 <channel name> :Cannot send to channel`
    ERR_CANNOTSENDTOCHAN = 404,
    /// `405 <channel name> :You have joined too many channels`
    ERR_TOOMANYCHANNELS = 405,
    /// `421 <command> :Unknown command`
    ERR_UNKNOWNCOMMAND  = 421,
    /// `422 :MOTD File is missing`
    ERR_NOMOTD          = 422,
    /// `431 :No nickname given`
    ERR_NONICKNAMEGIVEN = 431,
    /// `432 <nick> :Erroneous nickname`
    ERR_ERRONEOUSNICKNAME = 432,
    /// `433 <nick> :Nickname is already in use`
    ERR_NICKNAMEINUSE   = 433,
    /// `436 <nick> :Nickname collision KILL from <user>@<host>`
    ERR_NICKCOLLISION   = 436,
    /// `442 <channel> :You're not on that channel`
    ERR_NOTONCHANNEL    = 442,
    /// `451 :You have not registered`
    ERR_NOTREGISTERED   = 451,
    /// `461 <command> :Not enough parameters`
    ERR_NEEDMOREPARAMS  = 461,
    /// `462 :Unauthorized command (already registered)`
    ERR_ALREADYREGISTRED = 462,
    /// `464 :Password incorrect`
    ERR_PASSWDMISMATCH  = 464,
    /// `465 :You are banned from this server`
    ERR_YOUREBANNEDCREEP = 465,
    /// `471 <channel> :Cannot join channel (+l)`
    ERR_CHANNELISFULL   = 471,
    /// `473 <channel> :Cannot join channel (+i)`
    ERR_INVITEONLYCHAN  = 473,
    /// `474 <channel> :Cannot join channel (+b)`
    ERR_BANNEDFROMCHAN  = 474,
    /// `475 <channel> :Cannot join channel (+k)`
    ERR_BADCHANNELKEY   = 475,
    /// `482 <channel> :You're not channel operator`
    ERR_CHANOPRIVSNEEDED = 482
}

impl Response {
    /// Determines whether or not this response is an error response.
    ///
    /// All response codes of 400 and above are considered errors, as in RFC 2812.
    pub fn is_error(&self) -> bool {
        *self as u16 >= 400
    }

    /// Gets the numeric code of this response.
    pub fn code(&self) -> u16 {
        *self as u16
    }
}

impl FromStr for Response {
    type Err = &'static str;
    fn from_str(s: &str) -> Result<Response, &'static str> {
        if let Ok(rc) = s.parse() {
            match Response::from_u16(rc) {
                Some(r) => Ok(r),
                None => Err("Failed to parse due to unknown response code."),
            }
        } else {
            Err("Failed to parse response code.")
        }
    }
}
